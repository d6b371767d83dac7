//! Data models shared across the engine

pub mod api;
pub mod media;

pub use api::{ApiResponse, Episode, Genre, TitleImages, TitleMetadata};
pub use media::{EpisodeCursor, MediaEntry, MediaType, PlaybackTarget};
