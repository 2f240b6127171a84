//! Nightly window during which button presses are ignored.

use chrono::NaiveTime;

use crate::error::ValidationError;

/// Default start of quiet hours (inclusive).
pub const DEFAULT_QUIET_START: NaiveTime = match NaiveTime::from_hms_opt(23, 0, 0) {
    Some(time) => time,
    None => panic!("invalid quiet hours start"),
};

/// Default end of quiet hours (exclusive).
pub const DEFAULT_QUIET_END: NaiveTime = match NaiveTime::from_hms_opt(5, 30, 0) {
    Some(time) => time,
    None => panic!("invalid quiet hours end"),
};

/// Half-open wall-clock window `[start, end)`, wrapping midnight when
/// `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuietHours {
    start: NaiveTime,
    end: NaiveTime,
}

impl Default for QuietHours {
    fn default() -> Self {
        Self {
            start: DEFAULT_QUIET_START,
            end: DEFAULT_QUIET_END,
        }
    }
}

impl QuietHours {
    /// Build a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyQuietHours`] when both bounds are equal.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if start == end {
            return Err(ValidationError::EmptyQuietHours);
        }
        Ok(Self { start, end })
    }

    /// Inclusive start.
    #[must_use]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Exclusive end.
    #[must_use]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Whether `time` falls inside the window.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start < self.end {
            time >= self.start && time < self.end
        } else {
            // overnight
            time >= self.start || time < self.end
        }
    }
}
