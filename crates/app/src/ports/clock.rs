//! Clock port — injected so quiet-hours logic is testable.

use chrono::{DateTime, FixedOffset, Local};

/// Source of the current local wall-clock time.
pub trait Clock {
    /// Current time with the local UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// [`Clock`] backed by the operating system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        DateTime::<FixedOffset>::from(Local::now())
    }
}

impl<T: Clock> Clock for std::sync::Arc<T> {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}
