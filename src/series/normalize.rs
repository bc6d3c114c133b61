//! History normalization
//!
//! Turns a raw payload into an ordered [`Series`] plus asset metadata.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::error::{SeriesError, SeriesResult};
use super::types::{AssetInfo, ChartPoint, Prepared, RawPayload, Series};

/// Offset-less date-time layouts, interpreted as UTC
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse an ISO-8601 date string into Unix seconds
///
/// Accepts RFC 3339 (with offset), a date-time without offset and a bare
/// date. Input without an offset is read as UTC. Sub-second precision is
/// floored away.
pub fn parse_timestamp(input: &str) -> Option<i64> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }

    // Compact offsets such as +0200
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.timestamp());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc().timestamp());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

/// Normalize a raw payload
///
/// Copies the asset metadata, parses every date, sorts the points
/// ascending (stable for equal timestamps) and derives the series bounds.
/// Fails on an empty history or an unparseable date.
pub fn normalize(raw: &RawPayload) -> SeriesResult<Prepared> {
    let info = AssetInfo {
        farm: raw.farm.clone(),
        asset: raw.asset.clone(),
    };

    let mut chart_values = raw
        .tvl_staked_history
        .iter()
        .enumerate()
        .map(|(index, point)| {
            parse_timestamp(&point.date)
                .map(|date| ChartPoint::new(date, point.value))
                .ok_or_else(|| SeriesError::InvalidDate {
                    index,
                    value: point.date.clone(),
                })
        })
        .collect::<SeriesResult<Vec<_>>>()?;

    chart_values.sort_by_key(|p| p.date);

    let (start_date, end_date) = match (chart_values.first(), chart_values.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => return Err(SeriesError::EmptySeries),
    };

    tracing::debug!(
        farm = %info.farm,
        asset = %info.asset,
        points = chart_values.len(),
        start_date,
        end_date,
        "Normalized TVL history"
    );

    Ok(Prepared {
        info,
        data: Series {
            chart_values,
            start_date,
            end_date,
        },
    })
}
