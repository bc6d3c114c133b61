//! Core data types for the TVL series
//!
//! This module defines the fundamental types shared by the normalizer,
//! the tick generator and the presentation layer:
//! - `RawPayload` / `RawPoint`: the validated shape of the remote JSON
//! - `ChartPoint` / `Series`: the normalized, ordered time series
//! - `AssetInfo`: static metadata about the charted asset
//! - `Period`: the user-selected lookback window

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::SeriesError;

/// Seconds in one day, the spacing between axis ticks
pub const SECONDS_PER_DAY: i64 = 86_400;

/// A single history entry as received from the source (unordered)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawPoint {
    /// ISO-8601 timestamp
    pub date: String,
    /// Staked value at that time
    pub value: f64,
}

impl RawPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// The asset details payload returned by the history endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawPayload {
    pub farm: String,
    pub asset: String,
    pub tvl_staked_history: Vec<RawPoint>,
}

impl RawPayload {
    /// Parse a payload from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A normalized data point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    /// Unix timestamp in seconds
    pub date: i64,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(date: i64, value: f64) -> Self {
        Self { date, value }
    }
}

/// Ordered time series with its bounds
///
/// `chart_values` is sorted non-decreasing by `date`, `start_date` is the
/// first point's date and `end_date` the last point's date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub chart_values: Vec<ChartPoint>,
    pub start_date: i64,
    pub end_date: i64,
}

impl Series {
    pub fn len(&self) -> usize {
        self.chart_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chart_values.is_empty()
    }

    /// Smallest value in the series
    pub fn min_value(&self) -> Option<f64> {
        self.chart_values
            .iter()
            .map(|p| p.value)
            .reduce(f64::min)
    }

    /// Largest value in the series
    pub fn max_value(&self) -> Option<f64> {
        self.chart_values
            .iter()
            .map(|p| p.value)
            .reduce(f64::max)
    }

    /// Day ticks starting at `start_date` for the given period
    pub fn ticks(&self, period: Period) -> Vec<i64> {
        super::ticks::ticks_for_period(self.start_date, period.days())
    }

    /// Day ticks covering the whole series, inclusive of a partial last day
    pub fn span_ticks(&self) -> Result<Vec<i64>, SeriesError> {
        super::ticks::ticks(self.start_date, Some(self.end_date), None)
    }
}

/// Static metadata about the charted asset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetInfo {
    pub farm: String,
    pub asset: String,
}

/// Output of the normalizer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prepared {
    pub info: AssetInfo,
    pub data: Series,
}

/// Lookback window selectable on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Period {
    #[default]
    Week,
    TwoWeeks,
    Month,
    Quarter,
}

impl Period {
    /// Get all periods in selector order
    pub fn all() -> &'static [Period] {
        &[
            Period::Week,
            Period::TwoWeeks,
            Period::Month,
            Period::Quarter,
        ]
    }

    /// Length of the window in days
    pub fn days(&self) -> u32 {
        match self {
            Period::Week => 7,
            Period::TwoWeeks => 14,
            Period::Month => 30,
            Period::Quarter => 90,
        }
    }

    pub fn from_days(days: u32) -> Result<Self, SeriesError> {
        Period::all()
            .iter()
            .copied()
            .find(|p| p.days() == days)
            .ok_or_else(|| SeriesError::InvalidPeriod(days.to_string()))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d", self.days())
    }
}

impl FromStr for Period {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let digits = trimmed.strip_suffix('d').unwrap_or(&trimmed);
        let days: u32 = digits
            .parse()
            .map_err(|_| SeriesError::InvalidPeriod(s.to_string()))?;
        Period::from_days(days).map_err(|_| SeriesError::InvalidPeriod(s.to_string()))
    }
}

impl TryFrom<u32> for Period {
    type Error = SeriesError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Period::from_days(days)
    }
}

impl From<Period> for u32 {
    fn from(period: Period) -> Self {
        period.days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_deserialize() {
        let json = r#"{
            "farm": "Convex",
            "asset": "ETH_Convex_steth",
            "tvlStakedHistory": [
                {"date": "2024-01-02T00:00:00Z", "value": 5},
                {"date": "2024-01-01T00:00:00Z", "value": 3.5}
            ],
            "extra": true
        }"#;

        let payload = RawPayload::from_json(json).unwrap();
        assert_eq!(payload.farm, "Convex");
        assert_eq!(payload.asset, "ETH_Convex_steth");
        assert_eq!(payload.tvl_staked_history.len(), 2);
        assert_eq!(payload.tvl_staked_history[1].value, 3.5);
    }

    #[test]
    fn test_payload_missing_history_rejected() {
        let json = r#"{"farm": "Convex", "asset": "steth"}"#;
        assert!(RawPayload::from_json(json).is_err());
    }

    #[test]
    fn test_series_serializes_camel_case() {
        let series = Series {
            chart_values: vec![ChartPoint::new(10, 1.0)],
            start_date: 10,
            end_date: 10,
        };

        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["startDate"], 10);
        assert_eq!(json["endDate"], 10);
        assert_eq!(json["chartValues"][0]["date"], 10);
    }

    #[test]
    fn test_series_min_max() {
        let series = Series {
            chart_values: vec![
                ChartPoint::new(0, 4.0),
                ChartPoint::new(1, -2.0),
                ChartPoint::new(2, 9.5),
            ],
            start_date: 0,
            end_date: 2,
        };

        assert_eq!(series.min_value(), Some(-2.0));
        assert_eq!(series.max_value(), Some(9.5));
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("7".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("14d".parse::<Period>().unwrap(), Period::TwoWeeks);
        assert_eq!(" 30D ".parse::<Period>().unwrap(), Period::Month);
        assert_eq!("90".parse::<Period>().unwrap(), Period::Quarter);
        assert!("10".parse::<Period>().is_err());
        assert!("week".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_default_and_display() {
        assert_eq!(Period::default(), Period::Week);
        assert_eq!(Period::Quarter.to_string(), "90d");
        assert_eq!(
            Period::all().iter().map(|p| p.days()).collect::<Vec<_>>(),
            vec![7, 14, 30, 90]
        );
    }

    #[test]
    fn test_period_serde_as_days() {
        assert_eq!(serde_json::to_string(&Period::Month).unwrap(), "30");
        let period: Period = serde_json::from_str("14").unwrap();
        assert_eq!(period, Period::TwoWeeks);
        assert!(serde_json::from_str::<Period>("15").is_err());
    }
}
