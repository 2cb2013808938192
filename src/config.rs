use std::env;

/// Default listen address when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Process configuration, read once at startup and handed to the handler
/// state instead of being consulted from the environment per request.
#[derive(Clone, Debug)]
pub struct Config {
    /// GitHub API token from `GH_TOKEN`. `None` when unset or empty;
    /// metrics requests are then rejected with a configuration error,
    /// the server itself still starts.
    pub github_token: Option<String>,
    /// Listen address from `BIND_ADDR`.
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            github_token: env::var("GH_TOKEN").ok().filter(|t| !t.is_empty()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}
