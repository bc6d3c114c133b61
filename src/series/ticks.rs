//! Axis tick generation
//!
//! One tick per day in fixed epoch-second space, 86400 s apart. Ticks do
//! not follow wall-clock days, so daylight-saving shifts are ignored.

use super::error::{SeriesError, SeriesResult};
use super::types::SECONDS_PER_DAY;

/// Upper bound on ticks per request, about a century of days
pub const MAX_TICK_DAYS: usize = 36_600;

/// Generate day ticks starting at `start_date`
///
/// With `end_date` the tick count is the inclusive day span, where a
/// partial last day counts as a whole one; `end_date` wins when both
/// arguments are given. Without it the count is `period`. Spans longer
/// than [`MAX_TICK_DAYS`] and ticks past the `i64` range are rejected.
pub fn ticks(start_date: i64, end_date: Option<i64>, period: Option<u32>) -> SeriesResult<Vec<i64>> {
    let days = match (end_date, period) {
        (Some(end), _) => span_days(start_date, end)?,
        (None, Some(period)) => period as usize,
        (None, None) => {
            return Err(SeriesError::InvalidTickArguments(
                "either an end date or a period is required".to_string(),
            ))
        }
    };

    if days > MAX_TICK_DAYS {
        return Err(SeriesError::InvalidTickArguments(format!(
            "{} days exceeds the limit of {}",
            days, MAX_TICK_DAYS
        )));
    }

    (0..days as i64)
        .map(|i| day_tick(start_date, i))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| {
            SeriesError::InvalidTickArguments(format!(
                "{} days from {} overflows the timestamp range",
                days, start_date
            ))
        })
}

/// Day ticks for a known period, the infallible path used by the dashboard
///
/// Stops early rather than wrapping at the end of the `i64` range.
pub fn ticks_for_period(start_date: i64, period: u32) -> Vec<i64> {
    (0..i64::from(period))
        .map_while(|i| day_tick(start_date, i))
        .collect()
}

/// Inclusive day count between two timestamps
fn span_days(start_date: i64, end_date: i64) -> SeriesResult<usize> {
    if end_date < start_date {
        return Err(SeriesError::InvalidTickArguments(format!(
            "end date {} precedes start date {}",
            end_date, start_date
        )));
    }

    let diff = end_date.checked_sub(start_date).ok_or_else(|| {
        SeriesError::InvalidTickArguments(format!(
            "span from {} to {} overflows the timestamp range",
            start_date, end_date
        ))
    })?;

    // ceil(diff / day + 1)
    let partial = i64::from(diff % SECONDS_PER_DAY != 0);
    let days = diff / SECONDS_PER_DAY + 1 + partial;

    Ok(usize::try_from(days).unwrap_or(usize::MAX))
}

fn day_tick(start_date: i64, day: i64) -> Option<i64> {
    day.checked_mul(SECONDS_PER_DAY)
        .and_then(|offset| start_date.checked_add(offset))
}
