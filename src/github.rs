use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;

/// The never-changing URL to POST to for any GraphQL request.
pub const GITHUB_API_URL: &str = "https://api.github.com/graphql";

/// The one query this service issues, parameterized by `$login`. Fetches
/// the contribution counters, closed-issue total and the first 100 owned
/// public non-fork repositories ordered by star count descending.
pub const USER_METRICS_QUERY: &str = r#"
  query UserMetrics($login: String!) {
    user(login: $login) {
      login
      name
      contributionsCollection {
        totalCommitContributions
        totalPullRequestReviewContributions
        totalRepositoryDiscussionComments
      }
      issues(states: CLOSED) {
        totalCount
      }
      repositories(
        privacy: PUBLIC
        ownerAffiliations: OWNER
        isFork: false
        first: 100
        orderBy: { field: STARGAZERS, direction: DESC }
      ) {
        nodes {
          name
          stargazerCount
        }
        pageInfo {
          hasNextPage
        }
      }
    }
  }
"#;

#[derive(Clone)]
pub struct GithubClient {
    token: Arc<String>,
    http: Arc<Client>,
    endpoint: Arc<String>,
}

impl GithubClient {
    /// Create a GitHub GraphQL client against the real API endpoint.
    pub fn new(token: &str) -> Self {
        Self::with_endpoint(token, GITHUB_API_URL)
    }

    /// Create a client against an alternative endpoint. Tests point this
    /// at a local mock server.
    pub fn with_endpoint(token: &str, endpoint: &str) -> Self {
        Self {
            token: Arc::new(token.to_string()),
            http: Arc::new(Client::new()),
            endpoint: Arc::new(endpoint.to_string()),
        }
    }

    /// Low-level GraphQL request with HTTP status and `errors` checking.
    /// Returns the `data` field of the response payload.
    async fn graphql(&self, query: &str, variables: Value) -> Result<Value, ApiError> {
        let resp = self
            .http
            .post(self.endpoint.as_str())
            .bearer_auth(&*self.token)
            .header("User-Agent", "octometrics")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = resp.json().await.map_err(ApiError::InvalidJson)?;

        // A GraphQL-level `errors` list rides on an HTTP 200; the whole
        // request counts as failed.
        if let Some(errors) = payload.get("errors").and_then(Value::as_array) {
            let messages = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::UpstreamGraphql(messages));
        }

        Ok(payload.get("data").cloned().unwrap_or(Value::Null))
    }

    /// Fetch the raw metrics payload for `username`. Exactly one outbound
    /// call, no retries.
    pub async fn user_metrics(&self, username: &str) -> Result<Value, ApiError> {
        self.graphql(USER_METRICS_QUERY, json!({ "login": username }))
            .await
    }
}

/// Typed view of the upstream `user` object. Every field is optional so a
/// partial payload decodes cleanly; defaults are applied once, at mapping
/// time, instead of at each access site.
#[derive(Debug, Deserialize)]
pub struct GithubUser {
    pub login: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "contributionsCollection")]
    pub contributions_collection: Option<ContributionsCollection>,
    pub issues: Option<CountObj>,
    pub repositories: Option<RepositoryPage>,
}

#[derive(Debug, Deserialize)]
pub struct ContributionsCollection {
    #[serde(rename = "totalCommitContributions")]
    pub total_commit_contributions: Option<u64>,
    #[serde(rename = "totalPullRequestReviewContributions")]
    pub total_pull_request_review_contributions: Option<u64>,
    #[serde(rename = "totalRepositoryDiscussionComments")]
    pub total_repository_discussion_comments: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CountObj {
    #[serde(rename = "totalCount")]
    pub total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryPage {
    pub nodes: Option<Vec<RepositoryNode>>,
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryNode {
    pub name: Option<String>,
    #[serde(rename = "stargazerCount")]
    pub stargazer_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: Option<bool>,
}
