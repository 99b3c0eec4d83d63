use chrono::{Local, Offset};
use shared::MAX_TIMEZONE_OFFSET_MINUTES;
use std::fmt;

use crate::error::{BoardError, BoardResult};

/// Minutes east of UTC, as the week endpoint expects them.
///
/// A viewer in UTC-4 has an offset of `-240`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimezoneOffset(i32);

impl TimezoneOffset {
    pub const UTC: TimezoneOffset = TimezoneOffset(0);

    pub fn new(minutes: i32) -> BoardResult<Self> {
        if minutes.abs() > MAX_TIMEZONE_OFFSET_MINUTES {
            return Err(BoardError::InvalidTimezoneOffset(minutes));
        }
        Ok(Self(minutes))
    }

    /// Converts a JavaScript `Date.getTimezoneOffset()` value, which counts
    /// minutes *behind* UTC.
    pub fn from_browser_offset(raw: i32) -> BoardResult<Self> {
        Self::new(-raw)
    }

    /// The local offset right now. Recomputed on every call so a DST switch
    /// between two page loads is picked up.
    pub fn local() -> BoardResult<Self> {
        let seconds = Local::now().offset().fix().local_minus_utc();
        Self::new(seconds / 60)
    }

    pub fn minutes(self) -> i32 {
        self.0
    }
}

impl Default for TimezoneOffset {
    fn default() -> Self {
        Self::UTC
    }
}

impl fmt::Display for TimezoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = self.0.abs();
        write!(f, "UTC{}{:02}:{:02}", sign, abs / 60, abs % 60)
    }
}

/// Where the controller gets the viewer's offset from at call time
pub trait OffsetSource {
    fn current_offset(&self) -> BoardResult<TimezoneOffset>;
}

/// Uses the host's local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOffset;

impl OffsetSource for LocalOffset {
    fn current_offset(&self) -> BoardResult<TimezoneOffset> {
        TimezoneOffset::local()
    }
}

impl<F> OffsetSource for F
where
    F: Fn() -> BoardResult<TimezoneOffset>,
{
    fn current_offset(&self) -> BoardResult<TimezoneOffset> {
        self()
    }
}
