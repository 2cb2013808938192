pub mod config;
pub mod error;
pub mod github;
pub mod handlers;
pub mod metrics;
pub mod routes;

pub use config::Config;
pub use error::ApiError;
pub use github::GithubClient;

/// Shared, read-only handler state.
pub struct AppState {
    /// `None` when no token was configured. The server still starts, and
    /// each metrics request is rejected with the configuration error.
    pub github: Option<GithubClient>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            github: config.github_token.as_deref().map(GithubClient::new),
        }
    }
}
