//! TVL Series
//!
//! The logical core of the dashboard:
//!
//! - **types**: Raw payload, normalized series, asset metadata, periods
//! - **normalize**: Raw payload → sorted series with bounds
//! - **ticks**: Day ticks for the x-axis
//! - **error**: Error types
//!
//! # Data Flow
//!
//! ```text
//! RawPayload → normalize → Prepared { info, data }
//!                               │
//!            Period ────────────┴──► ticks(data.start_date, period)
//! ```
//!
//! # Example
//!
//! ```rust
//! use tvl_dashboard::series::{normalize, Period, RawPayload, RawPoint};
//!
//! let raw = RawPayload {
//!     farm: "Convex".to_string(),
//!     asset: "stETH".to_string(),
//!     tvl_staked_history: vec![
//!         RawPoint::new("2024-01-02T00:00:00Z", 5.0),
//!         RawPoint::new("2024-01-01T00:00:00Z", 3.0),
//!     ],
//! };
//!
//! let prepared = normalize(&raw).unwrap();
//! let ticks = prepared.data.ticks(Period::Week);
//! assert_eq!(ticks.len(), 7);
//! ```

pub mod error;
pub mod normalize;
pub mod ticks;
pub mod types;

pub use error::{SeriesError, SeriesResult};
pub use normalize::{normalize, parse_timestamp};
pub use ticks::{ticks, ticks_for_period};
pub use types::{
    AssetInfo, ChartPoint, Period, Prepared, RawPayload, RawPoint, Series, SECONDS_PER_DAY,
};
