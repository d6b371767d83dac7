//! Catalog metadata API response types
//!
//! Shapes returned by the metadata backend. Fields the engine does not act on
//! are kept lenient with `#[serde(default)]` so a backend revision cannot
//! break deserialization.

use serde::{Deserialize, Serialize};

use super::media::MediaEntry;

/// Generic response envelope used by every metadata endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Poster/backdrop/logo image URLs for a title
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleImages {
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub backdrop: String,
    #[serde(default)]
    pub logo: String,
}

/// Genre reference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Title metadata for a movie or a series.
///
/// Movies carry `runtime`, series carry `seasons`; the engine never guesses
/// the media type from these fields, that decision is made at the routing
/// boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleMetadata {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub images: TitleImages,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Movie runtime in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    /// Number of seasons of a series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<u32>,
    #[serde(default)]
    pub suggested: Vec<MediaEntry>,
}

impl TitleMetadata {
    /// Season count; 0 for movies
    pub fn season_count(&self) -> u32 {
        self.seasons.unwrap_or(0)
    }
}

/// Single episode as returned by the episode-list endpoint.
///
/// The controller only needs the list length; the rest is carried through for
/// the episode picker UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
