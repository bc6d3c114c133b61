//! Series Routes
//!
//! - GET /api/v1/series - Loading flag, asset info, series, period and ticks

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::PeriodParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::DashboardView;

/// GET /api/v1/series
///
/// `?period=` overrides the selected period for this response only.
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodParams>,
) -> ApiResult<Json<DashboardView>> {
    let period = params.period()?;

    let mut snapshot = state.dashboard.snapshot().await;
    if let Some(period) = period {
        snapshot.period = period;
    }

    Ok(Json(snapshot.view()))
}
