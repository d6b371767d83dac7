//! Embed URL resolver
//!
//! Pure mapping from (provider, playback target) to the URL loaded into the
//! player iframe. Deterministic, no side effects; an unknown provider name
//! resolves to an empty string and the caller falls back to the catalog
//! default. Season/episode bounds are not checked here — the resolver formats
//! whatever it is given.

use tracing::debug;

use crate::models::PlaybackTarget;
use crate::services::providers::{ProviderCatalog, UrlScheme};

/// Resolve a playback target to a provider-specific embed URL.
///
/// Resolution order for series targets: the catalog's series override map is
/// consulted first (a provider there uses a distinct series URL even when its
/// own scheme would also apply), then the provider's scheme. Movie targets
/// always use the provider's own scheme.
pub fn resolve(catalog: &ProviderCatalog, provider_name: &str, target: &PlaybackTarget) -> String {
    let Some(provider) = catalog.find(provider_name) else {
        debug!("unknown provider '{}', resolving to empty URL", provider_name);
        return String::new();
    };

    let id = urlencoding::encode(target.id());
    let base = provider.base_url.trim_end_matches('/');

    let mut url = match target {
        PlaybackTarget::Series {
            season, episode, ..
        } => {
            if let Some(override_base) = catalog.series_override(&provider.name) {
                format!("{}?id={}&s={}&e={}", override_base, id, season, episode)
            } else {
                match &provider.scheme {
                    UrlScheme::Path { series_segment, .. } => {
                        format!("{}/{}/{}/{}/{}", base, series_segment, id, season, episode)
                    }
                    UrlScheme::Query {
                        series_path,
                        id_param,
                        season_param,
                        episode_param,
                        ..
                    } => format!(
                        "{}{}?{}={}&{}={}&{}={}",
                        base, series_path, id_param, id, season_param, season, episode_param,
                        episode
                    ),
                    UrlScheme::SplitHost { series_base, .. } => {
                        format!(
                            "{}/{}/{}/{}",
                            series_base.trim_end_matches('/'),
                            id,
                            season,
                            episode
                        )
                    }
                }
            }
        }
        PlaybackTarget::Movie { .. } => match &provider.scheme {
            UrlScheme::Path { movie_segment, .. } => {
                format!("{}/{}/{}", base, movie_segment, id)
            }
            UrlScheme::Query {
                movie_path,
                id_param,
                ..
            } => format!("{}{}?{}={}", base, movie_path, id_param, id),
            UrlScheme::SplitHost { movie_base, .. } => {
                format!("{}/{}", movie_base.trim_end_matches('/'), id)
            }
        },
    };

    if matches!(target, PlaybackTarget::Series { .. }) {
        if let Some(suffix) = &provider.series_suffix {
            url.push_str(suffix);
        }
    }

    url
}
