//! Wall-clock seam for the response feed.
//!
//! Every `NarrationEvent` is stamped when the reactor appends it, and the
//! reactor never reads the system time directly. Tests pass a fixed clock so
//! feed entries compare equal across runs.

use chrono::{DateTime, Utc};

/// Supplies the timestamp for new feed entries.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Stamps feed entries with the device's UTC time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
