use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use chrono::{SecondsFormat, Utc};
use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::AppState;
use crate::error::ApiError;
use crate::github::GithubUser;
use crate::metrics::{Metrics, map_metrics};

/// Response envelope for a successful metrics request.
#[derive(Debug, Serialize)]
pub struct MetricsEnvelope {
    #[serde(rename = "requestedAt")]
    pub requested_at: String,
    pub metrics: Metrics,
    /// The upstream `data` payload, passed through unmodified.
    pub raw: Value,
}

/// Handler for `GET /api/metrics?username=<login>`.
pub async fn user_metrics(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<MetricsEnvelope>, ApiError> {
    // Configuration is checked before request shape: an unconfigured
    // server reports 500 regardless of the parameters it was given.
    let github = state.github.as_ref().ok_or(ApiError::MissingToken)?;
    let username = params
        .get("username")
        .filter(|u| !u.is_empty())
        .ok_or(ApiError::MissingUsername)?;

    debug!("fetching contribution metrics for {username}");
    let data = github.user_metrics(username).await?;

    let user_value = match data.get("user") {
        Some(v) if !v.is_null() => v.clone(),
        _ => return Err(ApiError::UserNotFound),
    };
    let user: GithubUser = serde_json::from_value(user_value)?;

    Ok(Json(MetricsEnvelope {
        requested_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        metrics: map_metrics(&user),
        raw: data,
    }))
}

/// Fallback for unsupported methods on the metrics route. axum's default
/// 405 has an empty body; the contract requires a JSON error object.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Liveness probe.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
