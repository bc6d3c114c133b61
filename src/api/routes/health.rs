//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Dashboard status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Reports whether the history is still loading, loaded, or unavailable.
/// A failed fetch shows up as "empty" rather than an error status.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshot = state.dashboard.snapshot().await;
    let points = snapshot.data.as_ref().map(|s| s.len()).unwrap_or(0);

    let status = if snapshot.loading || !state.dashboard.is_initialized() {
        "loading"
    } else if points > 0 {
        "ready"
    } else {
        "empty"
    };

    Json(HealthResponse {
        status: status.to_string(),
        points,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
