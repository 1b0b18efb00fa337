use crate::model::error::schedule::ScheduleError;
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// The persisted schedule record: the next run instant expressed in display
/// ("blog") time plus the opaque recurrence tag handed to the host scheduler.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Schedule {
    pub next_run: NaiveDateTime,
    pub recurrence: String,
}

/// Parses a time-of-day in `HH:MM` form (`HH:MM:SS` is tolerated, seconds are
/// discarded).
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, ScheduleError> {
    let parsed = NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| ScheduleError::InvalidTimeOfDay(raw.to_string()))?;
    Ok(NaiveTime::from_hms_opt(parsed.hour(), parsed.minute(), 0).unwrap_or(parsed))
}

/// Parses a weekday name in either short (`Mon`) or long (`Monday`) form.
pub fn parse_day_of_week(raw: &str) -> Result<Weekday, ScheduleError> {
    raw.parse::<Weekday>()
        .map_err(|_| ScheduleError::InvalidDayOfWeek(raw.to_string()))
}

/// Resolves the next run instant in display time.
///
/// With a weekday the candidate is aligned forward 0-6 days to that weekday;
/// a candidate at or before `display_now` is pushed a full week out, so a
/// same-day time that has already passed waits until next week. Without a
/// weekday a passed time advances exactly one day. Equal-to-now counts as
/// passed; the result is always strictly in the future.
pub fn resolve_next_run(
    display_now: NaiveDateTime,
    day: Option<Weekday>,
    time_of_day: NaiveTime,
) -> NaiveDateTime {
    let mut candidate = display_now.date().and_time(time_of_day);
    match day {
        Some(weekday) => {
            let days_ahead = (weekday.num_days_from_monday() + 7
                - candidate.weekday().num_days_from_monday())
                % 7;
            candidate += Duration::days(days_ahead as i64);
            if candidate <= display_now {
                candidate += Duration::days(7);
            }
        }
        None => {
            if candidate <= display_now {
                candidate += Duration::days(1);
            }
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn tod(raw: &str) -> NaiveTime {
        parse_time_of_day(raw).unwrap()
    }

    #[test]
    fn parses_short_and_long_day_names() {
        assert_eq!(parse_day_of_week("Mon").unwrap(), Weekday::Mon);
        assert_eq!(parse_day_of_week("monday").unwrap(), Weekday::Mon);
        assert_eq!(parse_day_of_week("Fri").unwrap(), Weekday::Fri);
        assert!(parse_day_of_week("Noday").is_err());
    }

    #[test]
    fn parses_time_of_day_and_drops_seconds() {
        assert_eq!(tod("09:30"), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(tod("00:00:30"), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert!(parse_time_of_day("25:00").is_err());
        assert!(parse_time_of_day("soon").is_err());
    }

    // 2012-03-12 is a Monday.

    #[test]
    fn future_time_today_stays_today() {
        let now = dt("2012-03-12 00:00:00");
        assert_eq!(
            resolve_next_run(now, Some(Weekday::Mon), tod("01:00")),
            dt("2012-03-12 01:00:00")
        );
        assert_eq!(resolve_next_run(now, None, tod("01:00")), dt("2012-03-12 01:00:00"));
    }

    #[test]
    fn passed_time_on_requested_weekday_waits_a_full_week() {
        let now = dt("2012-03-12 10:00:00");
        assert_eq!(
            resolve_next_run(now, Some(Weekday::Mon), tod("10:00")),
            dt("2012-03-19 10:00:00")
        );
        assert_eq!(
            resolve_next_run(now, Some(Weekday::Mon), tod("09:59")),
            dt("2012-03-19 09:59:00")
        );
    }

    #[test]
    fn equal_to_now_counts_as_passed() {
        let now = dt("2012-03-12 10:00:00");
        assert_eq!(resolve_next_run(now, None, tod("10:00")), dt("2012-03-13 10:00:00"));
    }

    #[test]
    fn passed_time_without_weekday_advances_one_day() {
        let now = dt("2012-03-12 10:00:00");
        assert_eq!(resolve_next_run(now, None, tod("00:00")), dt("2012-03-13 00:00:00"));
    }

    #[test]
    fn aligns_forward_to_later_weekday() {
        let now = dt("2012-03-12 12:00:00");
        assert_eq!(
            resolve_next_run(now, Some(Weekday::Fri), tod("09:00")),
            dt("2012-03-16 09:00:00")
        );
    }

    #[test]
    fn earlier_weekday_wraps_to_next_week() {
        // Requesting Sunday from a Monday lands six days out, not in the past.
        let now = dt("2012-03-12 12:00:00");
        assert_eq!(
            resolve_next_run(now, Some(Weekday::Sun), tod("09:00")),
            dt("2012-03-18 09:00:00")
        );
    }
}
