//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

use crate::error::DataShapeError;

/// UTC timestamp used for button edges, flag writes and log entries.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Convert a Unix timestamp in whole seconds (as reported by cloud shadows).
///
/// # Errors
///
/// Returns [`DataShapeError::TimestampOutOfRange`] when `secs` cannot be
/// represented.
pub fn from_unix_seconds(secs: i64) -> Result<Timestamp, DataShapeError> {
    DateTime::from_timestamp(secs, 0).ok_or(DataShapeError::TimestampOutOfRange(secs))
}
