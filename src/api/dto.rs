//! Data Transfer Objects
//!
//! Query parameters and response bodies of the dashboard endpoints.

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::series::Period;

/// `?period=` query parameter shared by the page, chart and series routes
#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
    #[serde(default)]
    pub period: Option<String>,
}

impl PeriodParams {
    /// Parsed period, `None` when the parameter is absent or blank
    pub fn period(&self) -> ApiResult<Option<Period>> {
        match self.period.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|e: crate::series::SeriesError| ApiError::Validation(e.to_string())),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "loading", "ready" or "empty"
    pub status: String,
    pub points: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(value: Option<&str>) -> PeriodParams {
        PeriodParams {
            period: value.map(str::to_string),
        }
    }

    #[test]
    fn test_period_param() {
        assert_eq!(params(None).period().unwrap(), None);
        assert_eq!(params(Some("")).period().unwrap(), None);
        assert_eq!(params(Some("14")).period().unwrap(), Some(Period::TwoWeeks));
        assert_eq!(params(Some("90d")).period().unwrap(), Some(Period::Quarter));
        assert!(matches!(
            params(Some("12")).period(),
            Err(ApiError::Validation(_))
        ));
    }
}
