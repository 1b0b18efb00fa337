use crate::interface::clock::Clock;
use chrono::{Duration, NaiveDateTime, Utc};
use std::sync::RwLock;

/// Real clock with a fixed display-timezone offset relative to UTC.
pub struct SystemClock {
    display_offset: Duration,
}

impl SystemClock {
    pub fn new(display_offset: Duration) -> Self {
        SystemClock { display_offset }
    }

    /// Display time equals system time.
    pub fn utc() -> Self {
        SystemClock::new(Duration::zero())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    fn now_in_display_tz(&self) -> NaiveDateTime {
        self.now() + self.display_offset
    }
}

#[derive(Debug, Clone, Copy)]
struct ManualClockState {
    system: NaiveDateTime,
    display: NaiveDateTime,
}

/// Settable clock. Both instants can be moved independently, which is what
/// the schedule tests rely on.
pub struct ManualClock {
    state: RwLock<ManualClockState>,
}

impl ManualClock {
    pub fn starting_at(system: NaiveDateTime, display: NaiveDateTime) -> Self {
        ManualClock {
            state: RwLock::new(ManualClockState { system, display }),
        }
    }

    pub fn set_system_time(&self, time: NaiveDateTime) {
        // The lock is never held across await points, so this is safe
        self.state.write().unwrap().system = time;
    }

    pub fn set_display_time(&self, time: NaiveDateTime) {
        // The lock is never held across await points, so this is safe
        self.state.write().unwrap().display = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.state.read().unwrap().system
    }

    fn now_in_display_tz(&self) -> NaiveDateTime {
        self.state.read().unwrap().display
    }
}
