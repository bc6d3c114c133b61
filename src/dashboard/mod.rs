//! Dashboard
//!
//! The presentation shell around the series core:
//!
//! - **state**: Loading flag, asset info, series and period; one-shot `init`
//! - **chart**: plotters area chart (SVG / PNG)
//! - **page**: server-rendered HTML page
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use tvl_dashboard::dashboard::{render_svg, ChartStyle, Dashboard};
//! use tvl_dashboard::series::Period;
//! use tvl_dashboard::source::FileSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dashboard = Dashboard::new(Period::Month);
//!
//!     // Network failures are logged; the chart then renders empty
//!     let _ = dashboard.init(&FileSource::new("history.json")).await;
//!
//!     let svg = render_svg(&dashboard.view().await, &ChartStyle::default())?;
//!     std::fs::write("chart.svg", svg)?;
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod error;
pub mod page;
pub mod state;

pub use chart::{render_png, render_svg, y_domain, ChartStyle};
pub use error::{DashboardError, RenderError};
pub use page::{escape_html, render_page};
pub use state::{Dashboard, DashboardState, DashboardView};
