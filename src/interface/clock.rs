use chrono::NaiveDateTime;

/// Dual-clock capability: the system clock drives the host scheduler, the
/// display ("blog") clock is what schedules and history are expressed in.
/// Both are injectable so tests can set them independently.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
    fn now_in_display_tz(&self) -> NaiveDateTime;
}
