//! Watch-page playback controller
//!
//! Orchestrates one watch-page visit: validates the requested position
//! against fetched metadata, resolves the selected provider to an embed URL,
//! records viewing history, and drives episode advancement. Every error is
//! terminal for the navigation attempt — the caller redirects home and no
//! partial state is left behind.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::models::{EpisodeCursor, MediaEntry, PlaybackTarget, TitleMetadata};
use crate::services::history::HistoryService;
use crate::services::metadata::{ApiError, MetadataSource};
use crate::services::providers::ProviderCatalog;
use crate::services::resolver::resolve;
use crate::services::storage::{keys, PersistenceStore};

/// Why a watch-page navigation must redirect home
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Unknown media id, or an id the backend rejects
    #[error("title not found")]
    NotFound,
    /// Requested season/episode exceeds the title's metadata
    #[error("season {season} episode {episode} out of range")]
    BoundsViolation { season: u32, episode: u32 },
    /// Metadata or episode-list fetch failed; treated like not-found
    #[error(transparent)]
    Fetch(#[from] ApiError),
}

/// Lifecycle of a watch-page visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Metadata not yet fetched
    Loading,
    /// Metadata present, URL resolvable
    Ready,
    /// Terminal; the caller navigates away
    Failed,
}

/// An incoming watch-page request, built once from the route.
///
/// Series mode is selected by the presence of both the `s` and `e` query
/// parameters; `me` optionally carries a max-episode count that skips the
/// episode-list fetch.
#[derive(Debug, Clone)]
pub struct WatchRequest {
    target: PlaybackTarget,
    max_episodes_hint: Option<u32>,
}

impl WatchRequest {
    /// Build a request from the watch route's path id and query parameters
    pub fn from_route(
        id: &str,
        season: Option<u32>,
        episode: Option<u32>,
        max_episodes: Option<u32>,
    ) -> Self {
        Self {
            target: PlaybackTarget::from_route(id, season, episode),
            max_episodes_hint: max_episodes,
        }
    }

    pub fn target(&self) -> &PlaybackTarget {
        &self.target
    }

    pub fn max_episodes_hint(&self) -> Option<u32> {
        self.max_episodes_hint
    }
}

/// Controller for a single watch-page visit
pub struct PlaybackController<M: MetadataSource> {
    catalog: ProviderCatalog,
    store: Arc<dyn PersistenceStore>,
    history: HistoryService,
    source: M,
    request: WatchRequest,
    phase: PlaybackPhase,
    title: Option<TitleMetadata>,
    max_episodes: u32,
    player_epoch: u64,
}

impl<M: MetadataSource> PlaybackController<M> {
    pub fn new(
        catalog: ProviderCatalog,
        store: Arc<dyn PersistenceStore>,
        source: M,
        request: WatchRequest,
    ) -> Self {
        let history = HistoryService::new(Arc::clone(&store));
        Self {
            catalog,
            store,
            history,
            source,
            request,
            phase: PlaybackPhase::Loading,
            title: None,
            max_episodes: 1,
            player_epoch: 0,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn title(&self) -> Option<&TitleMetadata> {
        self.title.as_ref()
    }

    pub fn max_episodes(&self) -> u32 {
        self.max_episodes
    }

    /// Render identity for the embedded player; changes whenever the
    /// provider changes so the frame reloads from a clean state
    pub fn player_epoch(&self) -> u64 {
        self.player_epoch
    }

    /// Resolve metadata and validate the requested position.
    ///
    /// Any error means the caller redirects home; the phase becomes
    /// [`PlaybackPhase::Failed`] and stays there for this visit.
    pub async fn load(&mut self) -> Result<(), PlaybackError> {
        self.phase = PlaybackPhase::Loading;

        match self.resolve_request().await {
            Ok(title) => {
                self.title = Some(title);
                self.phase = PlaybackPhase::Ready;
                Ok(())
            }
            Err(e) => {
                error!("watch request for '{}' failed: {}", self.request.target.id(), e);
                self.phase = PlaybackPhase::Failed;
                Err(e)
            }
        }
    }

    async fn resolve_request(&mut self) -> Result<TitleMetadata, PlaybackError> {
        let target = self.request.target.clone();
        let title = self
            .source
            .fetch_title(target.media_type(), target.id())
            .await?;

        // Every successful metadata fetch accumulates viewing history,
        // independent of whether playback itself goes on to succeed
        self.history.record_viewed(viewed_entry(&title, &target));

        if let PlaybackTarget::Series {
            id,
            season,
            episode,
        } = &target
        {
            if *season == 0 || *season > title.season_count() {
                return Err(PlaybackError::BoundsViolation {
                    season: *season,
                    episode: *episode,
                });
            }

            // The `me` override short-circuits the episode-count fetch
            let max_episodes = match self.request.max_episodes_hint {
                Some(hint) => hint,
                None => self.source.fetch_episodes(id, *season).await?.len() as u32,
            };

            if *episode == 0 || *episode > max_episodes {
                return Err(PlaybackError::BoundsViolation {
                    season: *season,
                    episode: *episode,
                });
            }

            self.max_episodes = max_episodes;
            self.history
                .save_cursor(id, &EpisodeCursor::new(*season, *episode));
        }

        Ok(title)
    }

    /// Currently selected provider name; falls back to the catalog's first
    /// entry when nothing is stored or the stored name left the catalog
    pub fn selected_provider(&self) -> String {
        match self.store.get(keys::SELECTED_PROVIDER) {
            Some(name) if self.catalog.find(&name).is_some() => name,
            stored => {
                if let Some(name) = stored {
                    debug!("stored provider '{}' not in catalog, using default", name);
                }
                self.catalog
                    .default_provider()
                    .map(|p| p.name.clone())
                    .unwrap_or_default()
            }
        }
    }

    /// Persist a provider selection and invalidate the player frame
    pub fn set_provider(&mut self, name: &str) {
        self.store.set(keys::SELECTED_PROVIDER, name);
        self.player_epoch += 1;
    }

    /// Embed URL for the current target and selected provider
    pub fn embed_url(&self) -> String {
        resolve(&self.catalog, &self.selected_provider(), &self.request.target)
    }

    /// Whether a "next episode" action is available
    pub fn can_advance(&self) -> bool {
        matches!(
            self.request.target,
            PlaybackTarget::Series { episode, .. } if episode < self.max_episodes
        )
    }

    /// The request for the next episode, preserving the season and the
    /// max-episode hint; `None` when already at the last known episode
    pub fn next_request(&self) -> Option<WatchRequest> {
        if !self.can_advance() {
            return None;
        }

        match &self.request.target {
            PlaybackTarget::Series {
                id,
                season,
                episode,
            } => Some(WatchRequest::from_route(
                id,
                Some(*season),
                Some(episode + 1),
                Some(self.max_episodes),
            )),
            PlaybackTarget::Movie { .. } => None,
        }
    }
}

fn viewed_entry(title: &TitleMetadata, target: &PlaybackTarget) -> MediaEntry {
    MediaEntry {
        id: title.id.clone(),
        poster: Some(title.images.poster.clone()).filter(|p| !p.is_empty()),
        title: title.title.clone(),
        media_type: target.media_type(),
    }
}
