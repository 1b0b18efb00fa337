use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid time of day, expected HH:MM: {0}")]
    InvalidTimeOfDay(String),

    #[error("Unrecognized day of week: {0}")]
    InvalidDayOfWeek(String),
}
