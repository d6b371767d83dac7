//! Engine services
//!
//! Each service owns one concern of the playback engine:
//!
//! - [`providers`] / [`resolver`]: provider catalog and embed URL resolution
//! - [`storage`]: durable key-value client state
//! - [`history`]: recently-viewed list and continue-watching cursors
//! - [`wishlist`]: wishlist set with keyed change notifications
//! - [`metadata`]: catalog metadata API client
//! - [`playback`]: watch-page controller
//! - [`title`]: detail-page browser
//! - [`carousel`]: carousel pagination geometry

pub mod carousel;
pub mod history;
pub mod metadata;
pub mod playback;
pub mod providers;
pub mod resolver;
pub mod storage;
pub mod title;
pub mod wishlist;

// Re-exports for convenience
pub use carousel::CarouselPaginator;
pub use history::HistoryService;
pub use metadata::{ApiError, MetadataClient, MetadataSource};
pub use playback::{PlaybackController, PlaybackError, PlaybackPhase, WatchRequest};
pub use providers::{Provider, ProviderCatalog, UrlScheme};
pub use resolver::resolve;
pub use storage::{DiskStore, MemoryStore, PersistenceStore};
pub use title::TitleBrowser;
pub use wishlist::{ListenerId, Wishlist};
