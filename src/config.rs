use std::env;

/// Engine configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the catalog metadata API
    pub api_base: String,
    /// Directory holding the persistent client state file
    pub state_dir: String,
    /// User-Agent sent on metadata requests
    pub user_agent: String,
    /// Metadata fetch timeout
    pub fetch_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            api_base: env::var("API_BASE")
                .unwrap_or_else(|_| "http://localhost:3001/api".to_string()),

            state_dir: env::var("STATE_DIR").unwrap_or_else(|_| ".reelview".to_string()),

            user_agent: env::var("USER_AGENT").unwrap_or_else(|_| "ReelView/1.0".to_string()),

            fetch_timeout_ms: env::var("FETCH_TIMEOUT_MS")
                .unwrap_or_else(|_| "15000".to_string())
                .parse()
                .unwrap_or(15_000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
