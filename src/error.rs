use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde_json::json;
use thiserror::Error;

/// Every failure the service reports, carrying its user-visible message.
/// Each variant maps to exactly one HTTP status; the response body is
/// always `{"error": <message>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required 'username' query parameter")]
    MissingUsername,
    #[error("User not found")]
    UserNotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Missing GH_TOKEN environment variable")]
    MissingToken,
    #[error("Network error sending GraphQL request: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Failed to parse JSON from GitHub: {0}")]
    InvalidJson(#[source] reqwest::Error),
    #[error("GitHub API error ({status}): {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("GitHub API returned errors: {0}")]
    UpstreamGraphql(String),
    #[error("Failed to deserialize user metrics response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUsername => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::MissingToken
            | ApiError::Transport(_)
            | ApiError::InvalidJson(_)
            | ApiError::UpstreamStatus { .. }
            | ApiError::UpstreamGraphql(_)
            | ApiError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            error!("{message}");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::ApiError;

    #[test]
    fn variants_map_to_contract_statuses() {
        assert_eq!(ApiError::MissingUsername.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::MissingToken.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::UpstreamGraphql("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_status_message_embeds_status_and_body() {
        let err = ApiError::UpstreamStatus {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "GitHub API error (502): bad gateway");
    }
}
