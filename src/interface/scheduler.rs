use chrono::NaiveDateTime;

/// The host scheduler's recurring-trigger registry. Instants are system-clock
/// time; the recurrence tag is passed through unmodified.
pub trait EventScheduler: Send + Sync {
    fn schedule_recurring(&self, event_name: &str, first_run: NaiveDateTime, recurrence: &str);
    fn next_scheduled(&self, event_name: &str) -> Option<NaiveDateTime>;
    fn unschedule(&self, event_name: &str);
}
