//! Dashboard Routes
//!
//! - GET / - The dashboard page; `?period=` selects the lookback window
//! - GET /chart.svg - The chart image for a period

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

use crate::api::dto::PeriodParams;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::{render_page, render_svg};

/// GET /
///
/// Selecting a period updates the dashboard's period and ticks; the
/// history is never refetched. A chart that fails to draw degrades to a
/// placeholder so the page still loads.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodParams>,
) -> ApiResult<Html<String>> {
    if let Some(period) = params.period()? {
        state.dashboard.select_period(period).await;
    }

    let view = state.dashboard.view().await;

    let svg = match render_svg(&view, &state.style) {
        Ok(svg) => Some(svg),
        Err(e) => {
            tracing::warn!(error = %e, "Chart render failed, serving placeholder");
            None
        }
    };

    Ok(Html(render_page(&view, svg.as_deref())))
}

/// GET /chart.svg
///
/// Renders for the requested period without changing the selection.
pub async fn chart_svg(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PeriodParams>,
) -> ApiResult<impl IntoResponse> {
    let period = params.period()?;

    let mut snapshot = state.dashboard.snapshot().await;
    if let Some(period) = period {
        snapshot.period = period;
    }

    let svg = render_svg(&snapshot.view(), &state.style)?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
