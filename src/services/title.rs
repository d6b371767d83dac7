//! Detail-page browser
//!
//! Backs the title detail page: loads metadata, resumes a series at its
//! continue-watching cursor, and serves the per-season episode list. Season
//! switches run through an explicit stale-response guard — the episode fetch
//! is keyed on the season captured when it started, and a result arriving
//! after the user moved on is discarded rather than applied.

use tracing::debug;

use crate::models::{Episode, MediaEntry, MediaType, TitleMetadata};
use crate::services::history::HistoryService;
use crate::services::metadata::MetadataSource;
use crate::services::playback::{PlaybackError, WatchRequest};

/// Token tying an episode-list fetch to the season it was started for
#[derive(Debug, Clone, Copy)]
pub struct SeasonFetch {
    season: u32,
}

/// Controller for one detail-page visit
pub struct TitleBrowser<M: MetadataSource> {
    source: M,
    history: HistoryService,
    media_type: MediaType,
    id: String,
    title: Option<TitleMetadata>,
    season: u32,
    episode: u32,
    episodes: Option<Vec<Episode>>,
}

impl<M: MetadataSource> TitleBrowser<M> {
    pub fn new(source: M, history: HistoryService, media_type: MediaType, id: &str) -> Self {
        Self {
            source,
            history,
            media_type,
            id: id.to_string(),
            title: None,
            season: 1,
            episode: 1,
            episodes: None,
        }
    }

    pub fn title(&self) -> Option<&TitleMetadata> {
        self.title.as_ref()
    }

    /// Currently selected season/episode position
    pub fn position(&self) -> (u32, u32) {
        (self.season, self.episode)
    }

    /// Episode list for the selected season; `None` while a fetch is pending
    pub fn episodes(&self) -> Option<&[Episode]> {
        self.episodes.as_deref()
    }

    pub fn max_episodes(&self) -> u32 {
        self.episodes.as_ref().map(|e| e.len() as u32).unwrap_or(0)
    }

    /// Fetch metadata, record the view, and for series resume the persisted
    /// position and load its episode list
    pub async fn load(&mut self) -> Result<(), PlaybackError> {
        if self.id.trim().is_empty() {
            return Err(PlaybackError::NotFound);
        }

        let title = self.source.fetch_title(self.media_type, &self.id).await?;

        self.history.record_viewed(MediaEntry {
            id: title.id.clone(),
            poster: Some(title.images.poster.clone()).filter(|p| !p.is_empty()),
            title: title.title.clone(),
            media_type: self.media_type,
        });

        self.title = Some(title);

        if self.media_type == MediaType::Series {
            if let Some(cursor) = self.history.cursor(&self.id) {
                self.season = cursor.season;
                self.episode = cursor.episode;
            }
            self.select_season(self.season).await?;
        }

        Ok(())
    }

    /// Start a season switch: select the season, drop the stale episode
    /// list, and return the token the eventual result must present
    pub fn begin_season(&mut self, season: u32) -> SeasonFetch {
        self.season = season;
        self.episodes = None;
        SeasonFetch { season }
    }

    /// Apply a fetched episode list. Returns `false` when the token's season
    /// is no longer the selected one and the result was discarded.
    pub fn apply_episodes(&mut self, fetch: SeasonFetch, episodes: Vec<Episode>) -> bool {
        if fetch.season != self.season {
            debug!(
                "discarding stale episode list for season {} (now {})",
                fetch.season, self.season
            );
            return false;
        }

        self.episodes = Some(episodes);
        true
    }

    /// Convenience: begin a season switch and fetch-and-apply its episodes
    pub async fn select_season(&mut self, season: u32) -> Result<(), PlaybackError> {
        let fetch = self.begin_season(season);
        let episodes = self.source.fetch_episodes(&self.id, season).await?;
        self.apply_episodes(fetch, episodes);
        Ok(())
    }

    /// Watch-page request for the current position
    pub fn play_request(&self) -> WatchRequest {
        match self.media_type {
            MediaType::Movie => WatchRequest::from_route(&self.id, None, None, None),
            MediaType::Series => {
                WatchRequest::from_route(&self.id, Some(self.season), Some(self.episode), None)
            }
        }
    }

    /// Wishlist/viewed payload for the loaded title
    pub fn media_entry(&self) -> Option<MediaEntry> {
        self.title.as_ref().map(|title| MediaEntry {
            id: title.id.clone(),
            poster: Some(title.images.poster.clone()).filter(|p| !p.is_empty()),
            title: title.title.clone(),
            media_type: self.media_type,
        })
    }
}
