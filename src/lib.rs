//! ReelView core engine
//!
//! Client-side playback engine for the ReelView media front end. The UI layer
//! (pages, cards, the actual iframe) lives elsewhere; this crate owns the
//! logic with real invariants:
//!
//! - **Provider catalog + URL resolver**: mapping a playback target to a
//!   provider-specific embed URL
//! - **Persistence store**: durable key-value state (selected provider,
//!   recently viewed, wishlist, continue-watching cursors)
//! - **Wishlist notifier**: keyed change signals so independent UI surfaces
//!   stay in sync
//! - **Playback controller**: watch-page orchestration with season/episode
//!   bounds checks
//! - **Carousel paginator**: pure pagination geometry for title rows

pub mod config;
pub mod models;
pub mod services;

pub use config::Config;
pub use models::{EpisodeCursor, MediaEntry, MediaType, PlaybackTarget, TitleMetadata};
pub use services::carousel::CarouselPaginator;
pub use services::metadata::{ApiError, MetadataClient, MetadataSource};
pub use services::playback::{PlaybackController, PlaybackError, WatchRequest};
pub use services::providers::{Provider, ProviderCatalog, UrlScheme};
pub use services::resolver::resolve;
pub use services::storage::{DiskStore, MemoryStore, PersistenceStore};
pub use services::wishlist::Wishlist;
