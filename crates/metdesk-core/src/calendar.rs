//! Observation-day arithmetic: UTC day windows and the Bangladesh-calendar
//! rainfall date rule

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::Serialize;

use crate::{CoreError, CoreResult};

/// Asia/Dhaka is UTC+06:00 all year
pub const DHAKA_UTC_OFFSET_HOURS: i64 = 6;

/// Half-open UTC interval `[start, end)` covering one observation day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

pub fn day_window(date: NaiveDate) -> DayWindow {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    DayWindow {
        start,
        end: start + Duration::days(1),
    }
}

/// Parse a `YYYY-MM-DD` reference date
pub fn parse_reference_date(raw: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidDate(raw.to_string()))
}

/// Parse a synoptic observation hour ("00".."23")
pub fn parse_observation_hour(raw: &str) -> CoreResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(hour) if hour < 24 => Ok(hour),
        _ => Err(CoreError::InvalidObservationHour(raw.to_string())),
    }
}

/// Civil date in Bangladesh at the given instant
pub fn bangladesh_date(now: DateTime<Utc>) -> NaiveDate {
    (now + Duration::hours(DHAKA_UTC_OFFSET_HOURS)).date_naive()
}

/// Date picked for a rainfall entry and the rule that picked it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RainfallDateSelection {
    pub utc_hour: u32,
    pub bangladesh_today: NaiveDate,
    pub date: NaiveDate,
    pub rule: String,
}

/// Default rainfall start/end date.
///
/// The 00 UTC observation closes the previous Bangladesh day, so it gets
/// yesterday's date; every other hour gets today's. Without an explicit
/// observation hour the UTC hour of `now` is used.
pub fn default_rainfall_date(
    now: DateTime<Utc>,
    observation_hour: Option<u32>,
) -> RainfallDateSelection {
    let utc_hour = observation_hour.unwrap_or_else(|| now.hour());
    let bangladesh_today = bangladesh_date(now);

    let (date, rule) = if utc_hour == 0 {
        (
            bangladesh_today
                .checked_sub_days(Days::new(1))
                .unwrap_or(bangladesh_today),
            "00 UTC → Previous date".to_string(),
        )
    } else {
        (bangladesh_today, format!("{utc_hour:02} UTC → Present date"))
    };

    RainfallDateSelection {
        utc_hour,
        bangladesh_today,
        date,
        rule,
    }
}
