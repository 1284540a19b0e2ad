use std::time::Instant;

use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

/// Wall-clock anchor advanced by a monotonic [`Instant`].
///
/// Timestamps never go backwards for the lifetime of the clock, even if the
/// system time is adjusted.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    wall: OffsetDateTime,
    origin: Instant,
}

impl Clock {
    pub fn new() -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        Self {
            wall: OffsetDateTime::now_utc().to_offset(offset),
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> OffsetDateTime {
        self.wall + self.origin.elapsed()
    }

    /// RFC 3339 rendering of [`Clock::now`].
    pub fn timestamp(&self) -> String {
        let now = self.now();
        now.format(&Rfc3339)
            .unwrap_or_else(|_| now.unix_timestamp().to_string())
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
