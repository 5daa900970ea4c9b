use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::ports::Clock;

/// Fixed clock that records requested sleeps instead of blocking.
pub struct ManualClock {
    now: DateTime<Utc>,
    pub sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now, sleeps: Mutex::new(Vec::new()) }
    }

    /// 2026-10-19 12:00 UTC.
    pub fn fixed() -> Self {
        Self::at(Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap())
    }

    pub fn slept(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
