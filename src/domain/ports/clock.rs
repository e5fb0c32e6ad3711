//! Time ports
//!
//! `Clock` dates backup copies; `Sleeper` spaces readiness probes. Both are
//! ports so tests neither wait nor depend on the calendar.

use std::time::Duration;

use chrono::NaiveDate;

pub trait Clock {
    /// Today's date in local time
    fn today(&self) -> NaiveDate;
}

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeper that returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSleeper;

impl Sleeper for NoopSleeper {
    fn sleep(&self, _duration: Duration) {}
}
