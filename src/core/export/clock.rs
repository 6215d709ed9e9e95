//! Wall-clock source for output file names

use chrono::{Local, NaiveDateTime};

/// `YYYYMMDD-HHmmss` in local time
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Supplies the local time each export is stamped with
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Render a timestamp as used in output file names
pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}
