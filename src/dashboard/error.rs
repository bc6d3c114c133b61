//! Dashboard error types

use thiserror::Error;

use crate::series::SeriesError;
use crate::source::FetchError;

/// Errors surfaced by dashboard initialization
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    /// `init` runs once per dashboard
    #[error("Dashboard already initialized")]
    AlreadyInitialized,
}

/// Errors that can occur while rendering the chart
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
