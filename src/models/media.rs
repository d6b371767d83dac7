use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Media type of a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    /// Parse a route segment ("movie" / "series")
    pub fn from_route(segment: &str) -> Option<Self> {
        match segment {
            "movie" => Some(MediaType::Movie),
            "series" => Some(MediaType::Series),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Movie => write!(f, "movie"),
            MediaType::Series => write!(f, "series"),
        }
    }
}

/// A concrete playback target, discriminated once at the routing boundary.
///
/// Presence of both season and episode query parameters selects series mode;
/// nothing deeper in the engine re-infers the media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackTarget {
    Movie {
        id: String,
    },
    Series {
        id: String,
        season: u32,
        episode: u32,
    },
}

impl PlaybackTarget {
    /// Build a target from watch-page route parameters
    pub fn from_route(id: &str, season: Option<u32>, episode: Option<u32>) -> Self {
        match (season, episode) {
            (Some(season), Some(episode)) => PlaybackTarget::Series {
                id: id.to_string(),
                season,
                episode,
            },
            _ => PlaybackTarget::Movie { id: id.to_string() },
        }
    }

    /// Opaque catalog id of the target
    pub fn id(&self) -> &str {
        match self {
            PlaybackTarget::Movie { id } => id,
            PlaybackTarget::Series { id, .. } => id,
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            PlaybackTarget::Movie { .. } => MediaType::Movie,
            PlaybackTarget::Series { .. } => MediaType::Series,
        }
    }

    /// Season/episode position, present only for series targets
    pub fn position(&self) -> Option<(u32, u32)> {
        match self {
            PlaybackTarget::Movie { .. } => None,
            PlaybackTarget::Series {
                season, episode, ..
            } => Some((*season, *episode)),
        }
    }
}

/// A title reference persisted in the recently-viewed list and the wishlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

impl MediaEntry {
    /// Key used for de-duplication and wishlist membership
    pub fn key(&self) -> (String, MediaType) {
        (self.id.clone(), self.media_type)
    }
}

/// Last-watched position of a series, persisted per series id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeCursor {
    pub season: u32,
    pub episode: u32,
    /// Unix milliseconds of the last update; 0 for entries written before
    /// the field existed
    #[serde(default)]
    pub watched_at: i64,
}

impl EpisodeCursor {
    pub fn new(season: u32, episode: u32) -> Self {
        Self {
            season,
            episode,
            watched_at: Utc::now().timestamp_millis(),
        }
    }
}
