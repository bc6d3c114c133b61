//! Series error types
//!
//! Defines the errors raised while normalizing history and generating ticks.

use thiserror::Error;

/// Errors that can occur while shaping a series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// The history array contained no points
    #[error("Empty series: the history contains no data points")]
    EmptySeries,

    /// A history entry carried a date no supported format accepts
    #[error("Invalid date at index {index}: {value:?}")]
    InvalidDate { index: usize, value: String },

    /// Tick generation needs an end date or a period, and a non-negative span
    #[error("Invalid tick arguments: {0}")]
    InvalidTickArguments(String),

    /// Period outside the selectable set
    #[error("Invalid period: {0} (expected one of 7, 14, 30, 90)")]
    InvalidPeriod(String),
}

/// Result type alias for series operations
pub type SeriesResult<T> = Result<T, SeriesError>;
