//! Clock trait for the instants the store stamps on records.

use chrono::{DateTime, SubsecRound, Utc};

/// Source of "now" for slug suffixes and `createdAt` stamps.
pub trait Clock: Send + Sync {
    /// Current instant, at millisecond precision.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}
