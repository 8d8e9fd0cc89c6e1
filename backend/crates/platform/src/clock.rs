//! Wall clock abstraction
//!
//! Anything that stamps or buckets by time reads it through [`Clock`] so
//! tests can pin the instant and the local offset.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Offset of the host's local time zone
    fn local_offset(&self) -> FixedOffset;

    /// `instant` expressed in the local time zone
    fn to_local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.local_offset())
    }
}

/// The operating system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_offset(&self) -> FixedOffset {
        *Local::now().offset()
    }
}

/// A clock frozen at one instant and one offset
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { instant, offset }
    }

    /// Frozen at `instant` with local time equal to UTC
    pub fn utc(instant: DateTime<Utc>) -> Self {
        Self::new(instant, Utc.fix())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn local_offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Format an instant at hour granularity as `YYYYMMDDHH`
pub fn hour_stamp<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    instant.format("%Y%m%d%H").to_string()
}
