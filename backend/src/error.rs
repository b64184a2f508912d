//! Error types for the scheduling kernel.
//!
//! The taxonomy is deliberately narrow: only invalid configurations surface
//! as errors. Malformed external records are skipped record-by-record, and a
//! horizon that yields no feasible day is an empty result, not an error.

use chrono::NaiveTime;
use thiserror::Error;

/// Result type for scheduling kernel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that reject a schedule request before scanning starts.
#[derive(Error, Debug)]
pub enum Error {
    /// A staffing row carries an unusable demand tuple
    #[error("staffing row {index} is invalid: {reason}")]
    InvalidRow { index: usize, reason: String },

    /// The allowed-weekdays filter excludes every weekday
    #[error("allowed weekdays must not be empty")]
    EmptyWeekdays,

    /// The configurable working start does not precede the fixed end
    #[error("working start {start} must precede the fixed working end {end}")]
    InvalidWorkingStart { start: NaiveTime, end: NaiveTime },

    /// max_results must allow at least one candidate
    #[error("max_results must be positive")]
    ZeroMaxResults,

    /// horizon_days must cover at least one future day
    #[error("horizon_days must be positive")]
    ZeroHorizon,

    /// The business-zone UTC offset cannot be represented
    #[error("utc offset of {minutes} minutes is out of range")]
    OffsetOutOfRange { minutes: i32 },
}
