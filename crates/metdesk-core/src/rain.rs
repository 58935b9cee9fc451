//! Rain duration arithmetic over "HH:MM" slots and legacy timestamps

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::types::{RawWeatherObservation, TimeSlot};
use crate::units::round0;
use crate::{CoreError, CoreResult};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Numeric value of one clock component. Blank reads as zero; anything that
/// is not an integer no greater than `max` is `None`.
fn clock_component(part: Option<&str>, max: i64) -> Option<i64> {
    let part = part?.trim();
    if part.is_empty() {
        return Some(0);
    }
    part.parse().ok().filter(|value| (0..=max).contains(value))
}

/// Hour and minute components of an "HH:MM" string, each `None` when absent,
/// not numeric or outside the clock face.
fn clock_parts(hhmm: &str) -> (Option<i64>, Option<i64>) {
    let mut parts = hhmm.split(':');
    let hour = clock_component(parts.next(), 23);
    let minute = clock_component(parts.next(), 59);
    (hour, minute)
}

/// Minutes after midnight, `None` unless both components are numeric
pub fn clock_minutes(hhmm: &str) -> Option<i64> {
    match clock_parts(hhmm) {
        (Some(h), Some(m)) => Some(h * 60 + m),
        _ => None,
    }
}

/// Minutes after midnight with unreadable components counted as zero
fn lenient_clock_minutes(hhmm: &str) -> i64 {
    let (hour, minute) = clock_parts(hhmm);
    hour.unwrap_or(0) * 60 + minute.unwrap_or(0)
}

/// Strict "HH:MM" validation for slot editing
pub fn parse_clock(hhmm: &str) -> CoreResult<NaiveTime> {
    let bytes = hhmm.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(CoreError::InvalidTimeOfDay(hhmm.to_string()));
    }
    NaiveTime::parse_from_str(hhmm, "%H:%M")
        .map_err(|_| CoreError::InvalidTimeOfDay(hhmm.to_string()))
}

/// Whole minutes from `start` to `end`, rolling `end` forward a day when it
/// precedes `start`. Never negative.
pub fn interval_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let end = if end < start {
        match end.checked_add_signed(Duration::days(1)) {
            Some(end) => end,
            None => return 0,
        }
    } else {
        end
    };
    let millis = (end - start).num_milliseconds() as f64;
    (round0(millis / 60_000.0) as i64).max(0)
}

/// Rain minutes covered by one slot placed on `reference_date`.
/// `None` when the slot is missing either end or cannot be placed on that day.
pub fn slot_minutes(slot: &TimeSlot, reference_date: NaiveDate) -> Option<i64> {
    let (start, end) = (slot.start()?, slot.end()?);
    let midnight = reference_date.and_time(NaiveTime::MIN).and_utc();
    let start = midnight.checked_add_signed(Duration::minutes(lenient_clock_minutes(start)))?;
    let end = midnight.checked_add_signed(Duration::minutes(lenient_clock_minutes(end)))?;
    Some(interval_minutes(start, end))
}

/// Total rain minutes recorded by one observation.
///
/// Structured slots win when any are present; otherwise the legacy start/end
/// pair is used; otherwise zero.
pub fn sum_rain_minutes(observation: &RawWeatherObservation, reference_date: NaiveDate) -> i64 {
    if let Some(slots) = observation
        .rain_time_slots
        .as_ref()
        .filter(|slots| !slots.is_empty())
    {
        return slots
            .iter()
            .filter_map(|slot| slot_minutes(slot, reference_date))
            .sum();
    }

    match (observation.legacy_rain_start, observation.legacy_rain_end) {
        (Some(start), Some(end)) => interval_minutes(start, end),
        _ => 0,
    }
}

/// Zero-padded "HHMM" duration
pub fn format_hhmm(minutes: i64) -> String {
    format!("{:02}{:02}", minutes / 60, minutes % 60)
}

/// Short human form: "0m", "45m", "2h", "2h 5m"
pub fn minutes_to_hm(minutes: i64) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    if minutes <= 0 {
        "0m".to_string()
    } else if h == 0 {
        format!("{m}m")
    } else if m == 0 {
        format!("{h}h")
    } else {
        format!("{h}h {m}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 14).unwrap()
    }

    fn slots(pairs: &[(&str, &str)]) -> RawWeatherObservation {
        RawWeatherObservation {
            rain_time_slots: Some(
                pairs
                    .iter()
                    .enumerate()
                    .map(|(i, (s, e))| TimeSlot::new(i.to_string(), s, e))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_midnight_crossing_slot() {
        let slot = TimeSlot::new("a", "23:30", "00:15");
        assert_eq!(slot_minutes(&slot, date()), Some(45));
    }

    #[test]
    fn test_missing_end_is_skipped() {
        let mut obs = slots(&[("08:00", "08:30")]);
        if let Some(list) = obs.rain_time_slots.as_mut() {
            list.push(TimeSlot {
                id: "open".into(),
                time_start: Some("10:00".into()),
                time_end: None,
            });
            list.push(TimeSlot {
                id: "blank".into(),
                time_start: Some("11:00".into()),
                time_end: Some(String::new()),
            });
        }
        assert_eq!(sum_rain_minutes(&obs, date()), 30);
    }

    #[test]
    fn test_equal_start_end_is_zero() {
        let obs = slots(&[("06:00", "06:00")]);
        assert_eq!(sum_rain_minutes(&obs, date()), 0);
    }

    #[test]
    fn test_unreadable_components_count_as_zero() {
        // "xx:30" is read as 00:30
        let obs = slots(&[("xx:30", "01:00")]);
        assert_eq!(sum_rain_minutes(&obs, date()), 30);
    }

    #[test]
    fn test_slots_take_priority_over_legacy() {
        let mut obs = slots(&[("08:00", "09:00")]);
        obs.legacy_rain_start = Some(Utc.with_ymd_and_hms(2026, 7, 14, 1, 0, 0).unwrap());
        obs.legacy_rain_end = Some(Utc.with_ymd_and_hms(2026, 7, 14, 5, 0, 0).unwrap());
        assert_eq!(sum_rain_minutes(&obs, date()), 60);

        obs.rain_time_slots = Some(Vec::new());
        assert_eq!(sum_rain_minutes(&obs, date()), 240);
    }

    #[test]
    fn test_legacy_pair_rolls_over_midnight() {
        let obs = RawWeatherObservation {
            legacy_rain_start: Some(Utc.with_ymd_and_hms(2026, 7, 14, 22, 0, 0).unwrap()),
            legacy_rain_end: Some(Utc.with_ymd_and_hms(2026, 7, 14, 1, 30, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(sum_rain_minutes(&obs, date()), 210);
    }

    #[test]
    fn test_no_rain_information() {
        assert_eq!(sum_rain_minutes(&RawWeatherObservation::default(), date()), 0);
    }

    #[test]
    fn test_clock_minutes() {
        assert_eq!(clock_minutes("09:45"), Some(585));
        assert_eq!(clock_minutes("9"), None);
        assert_eq!(clock_minutes("ab:10"), None);
        assert_eq!(clock_minutes("24:00"), None);
        assert_eq!(clock_minutes("10:75"), None);
        assert_eq!(clock_minutes("-1:30"), None);
        assert_eq!(clock_minutes("9223372036854775807:00"), None);
    }

    #[test]
    fn test_oversized_hour_reads_as_midnight() {
        let obs = slots(&[("9999999999:00", "01:00")]);
        assert_eq!(sum_rain_minutes(&obs, date()), 60);

        let obs = slots(&[("9223372036854775807:00", "01:00")]);
        assert_eq!(sum_rain_minutes(&obs, date()), 60);
    }

    #[test]
    fn test_slot_at_end_of_calendar() {
        let slot = TimeSlot::new("a", "23:00", "01:00");
        assert_eq!(slot_minutes(&slot, NaiveDate::MAX), Some(0));
    }

    #[test]
    fn test_parse_clock_is_strict() {
        assert!(parse_clock("23:59").is_ok());
        assert!(parse_clock("24:00").is_err());
        assert!(parse_clock("7:05").is_err());
        assert!(parse_clock("07:60").is_err());
    }

    #[test]
    fn test_duration_formats() {
        assert_eq!(format_hhmm(45), "0045");
        assert_eq!(format_hhmm(605), "1005");
        assert_eq!(minutes_to_hm(0), "0m");
        assert_eq!(minutes_to_hm(45), "45m");
        assert_eq!(minutes_to_hm(120), "2h");
        assert_eq!(minutes_to_hm(125), "2h 5m");
    }
}
