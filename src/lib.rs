//! # TVL Dashboard
//!
//! Fetches the staked-value history of one asset, normalizes it into a
//! sorted series, and renders it as an area chart over a selectable
//! lookback window.
//!
//! ## Modules
//!
//! - [`series`]: Payload normalization and axis tick generation
//! - [`format`]: Compact value and `dd.MM` date labels
//! - [`source`]: Where the raw history comes from (HTTP or file)
//! - [`dashboard`]: Dashboard state, chart rendering and the HTML page
//! - [`api`]: Web server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tvl_dashboard::dashboard::{render_svg, ChartStyle, Dashboard};
//! use tvl_dashboard::series::Period;
//! use tvl_dashboard::source::{AssetClient, AssetClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AssetClient::new(AssetClientConfig::default())?;
//!
//!     let dashboard = Dashboard::new(Period::Month);
//!     dashboard.init(&client).await?;
//!
//!     let svg = render_svg(&dashboard.view().await, &ChartStyle::default())?;
//!     std::fs::write("tvl.svg", svg)?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod series;
pub mod source;

// Re-export top-level types for convenience
pub use series::{
    normalize, ticks, AssetInfo, ChartPoint, Period, Prepared, RawPayload, RawPoint, Series,
    SeriesError, SeriesResult,
};

pub use format::{format_date, format_value};

pub use source::{AssetClient, AssetClientConfig, FetchError, FileSource, SeriesSource};

pub use dashboard::{
    render_png, render_svg, ChartStyle, Dashboard, DashboardError, DashboardState, DashboardView,
    RenderError,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
