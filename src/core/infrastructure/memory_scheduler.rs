use crate::interface::scheduler::EventScheduler;
use chrono::NaiveDateTime;
use dashmap::DashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent {
    pub first_run: NaiveDateTime,
    pub recurrence: String,
}

/// In-process stand-in for the host scheduler's trigger registry. Keeps the
/// latest registration per event name.
#[derive(Debug, Default)]
pub struct InMemoryScheduler {
    events: DashMap<String, ScheduledEvent>,
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        InMemoryScheduler::default()
    }

    pub fn scheduled_event(&self, event_name: &str) -> Option<ScheduledEvent> {
        self.events.get(event_name).map(|entry| entry.value().clone())
    }
}

impl EventScheduler for InMemoryScheduler {
    fn schedule_recurring(&self, event_name: &str, first_run: NaiveDateTime, recurrence: &str) {
        self.events.insert(
            event_name.to_string(),
            ScheduledEvent {
                first_run,
                recurrence: recurrence.to_string(),
            },
        );
    }

    fn next_scheduled(&self, event_name: &str) -> Option<NaiveDateTime> {
        self.events.get(event_name).map(|entry| entry.first_run)
    }

    fn unschedule(&self, event_name: &str) {
        self.events.remove(event_name);
    }
}
