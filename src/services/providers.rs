//! Playback provider catalog
//!
//! Third-party embed providers and the URL conventions each one expects.
//! Every provider's URL construction is explicit data — a [`UrlScheme`]
//! descriptor plus an optional catalog-level series override — evaluated by
//! the single formatter in [`crate::services::resolver`]. New providers are
//! added as catalog rows, never as resolver branches.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// URL construction rule for a provider.
///
/// The shapes cover every convention in the catalog; anything a provider does
/// beyond these is expressed through `Provider::series_suffix` or the
/// catalog's series override map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum UrlScheme {
    /// Path-append style:
    /// `{base}/{movie_segment}/{id}` and
    /// `{base}/{series_segment}/{id}/{season}/{episode}`
    Path {
        movie_segment: String,
        series_segment: String,
    },
    /// Query-parameter style:
    /// `{base}{movie_path}?{id_param}={id}` and
    /// `{base}{series_path}?{id_param}={id}&{season_param}=..&{episode_param}=..`
    Query {
        movie_path: String,
        series_path: String,
        id_param: String,
        season_param: String,
        episode_param: String,
    },
    /// Hard-coded alternate hosts replacing the declared base per media type:
    /// `{movie_base}/{id}` and `{series_base}/{id}/{season}/{episode}`
    SplitHost {
        movie_base: String,
        series_base: String,
    },
}

impl UrlScheme {
    /// The common `/movie/{id}` + `/tv/{id}/{s}/{e}` path shape
    pub fn path() -> Self {
        UrlScheme::Path {
            movie_segment: "movie".to_string(),
            series_segment: "tv".to_string(),
        }
    }

    /// Path shape with custom segments (e.g. `filme`/`serie`)
    pub fn path_segments(movie: &str, series: &str) -> Self {
        UrlScheme::Path {
            movie_segment: movie.to_string(),
            series_segment: series.to_string(),
        }
    }

    /// The plain `?id={id}` + `?id={id}&s={s}&e={e}` query shape
    pub fn query() -> Self {
        UrlScheme::Query {
            movie_path: String::new(),
            series_path: String::new(),
            id_param: "id".to_string(),
            season_param: "s".to_string(),
            episode_param: "e".to_string(),
        }
    }

    /// Query shape with custom sub-paths and parameter names
    pub fn query_named(
        movie_path: &str,
        series_path: &str,
        id_param: &str,
        season_param: &str,
        episode_param: &str,
    ) -> Self {
        UrlScheme::Query {
            movie_path: movie_path.to_string(),
            series_path: series_path.to_string(),
            id_param: id_param.to_string(),
            season_param: season_param.to_string(),
            episode_param: episode_param.to_string(),
        }
    }

    pub fn split_host(movie_base: &str, series_base: &str) -> Self {
        UrlScheme::SplitHost {
            movie_base: movie_base.to_string(),
            series_base: series_base.to_string(),
        }
    }
}

/// A third-party embed provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    /// Display name, also the lookup key
    pub name: String,
    /// Declared base URL; trailing slashes are normalized away on resolution
    pub base_url: String,
    pub scheme: UrlScheme,
    /// Static suffix appended only to series URLs (autoplay/styling flags)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_suffix: Option<String>,
}

impl Provider {
    pub fn new(name: &str, base_url: &str, scheme: UrlScheme) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.to_string(),
            scheme,
            series_suffix: None,
        }
    }

    pub fn with_series_suffix(mut self, suffix: &str) -> Self {
        self.series_suffix = Some(suffix.to_string());
        self
    }
}

/// Ordered, immutable provider catalog.
///
/// Fixed at construction; ordering is the display order of the provider
/// selector. The series override map holds providers whose series playback
/// uses an entirely different URL than their movie playback.
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    providers: Vec<Provider>,
    series_overrides: HashMap<String, String>,
}

impl ProviderCatalog {
    pub fn new(providers: Vec<Provider>, series_overrides: HashMap<String, String>) -> Self {
        Self {
            providers,
            series_overrides,
        }
    }

    /// Providers in display order
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Provider names in display order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name.as_str())
    }

    /// Lookup by display name
    pub fn find(&self, name: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Series-mode URL override for a provider, if any
    pub fn series_override(&self, name: &str) -> Option<&str> {
        self.series_overrides.get(name).map(|s| s.as_str())
    }

    /// Fallback provider: the catalog's first entry
    pub fn default_provider(&self) -> Option<&Provider> {
        self.providers.first()
    }

    /// The provider set the ReelView front end ships with
    pub fn builtin() -> Self {
        let providers = vec![
            Provider::new("Braflix", "https://vid.braflix.win/embed", UrlScheme::path()),
            Provider::new("Vidlink", "https://vidlink.pro", UrlScheme::path()),
            Provider::new(
                "Multi",
                "https://vidsrc.dev/embed",
                UrlScheme::split_host("https://vidsrc.dev/embed/movie", "https://vidsrc.dev/embed/tv"),
            ),
            Provider::new("Viaplay", "https://api.vidsrc.win/vid.html", UrlScheme::query()),
            Provider::new("Vidplay", "https://vidsrc.cc/v2/embed", UrlScheme::path()),
            Provider::new("Pro", "https://vidsrc.pro/embed", UrlScheme::path()),
            Provider::new("Vidsrc", "https://vidsrc.io/embed", UrlScheme::path()),
            Provider::new("2embed", "https://www.2embed.stream/embed", UrlScheme::path()),
            Provider::new(
                "PrimeWire",
                "https://www.primewire.tf/embed",
                UrlScheme::query_named("/movie", "/tv", "tmdb", "season", "episode"),
            ),
            Provider::new("LimeWire", "https://bombthe.irish/embed", UrlScheme::path()),
            Provider::new("Hindi HD", "https://api.vidsrc.win/hindi.html", UrlScheme::query()),
            Provider::new("Autoembed", "https://player.autoembed.cc/embed", UrlScheme::path()),
            Provider::new("India I", "https://api.vidsrc.win/green.html", UrlScheme::query()),
            Provider::new("India II", "https://api.vidsrc.win/embed.html", UrlScheme::query()),
            Provider::new("India III", "https://api.vidsrc.win/api.html", UrlScheme::query()),
            Provider::new(
                "Brazil",
                "https://embed.warezcdn.com",
                UrlScheme::path_segments("filme", "serie"),
            ),
            Provider::new("Super", "https://api.vidsrc.win/super.html", UrlScheme::query()),
            Provider::new(
                "Flixy",
                "https://flicky.host/embed",
                UrlScheme::query_named("/movie/", "/tv/", "id", "s", "e"),
            ),
        ];

        let series_overrides = HashMap::from([
            ("India I".to_string(), "https://api.vidsrc.win/greentv.html".to_string()),
            ("India II".to_string(), "https://api.vidsrc.win/embedtv.html".to_string()),
            ("Viaplay".to_string(), "https://api.vidsrc.win/vidtv.html".to_string()),
            ("Hindi HD".to_string(), "https://api.vidsrc.win/hinditv.html".to_string()),
            ("Super".to_string(), "https://api.vidsrc.win/vidtv.html".to_string()),
        ]);

        Self::new(providers, series_overrides)
    }
}

impl Default for ProviderCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
