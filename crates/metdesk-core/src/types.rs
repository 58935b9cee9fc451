//! Core data types for synoptic card entries and derived summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::units::parse_numeric;

/// A raw numeric card value as it was entered.
///
/// Card forms submit either JSON numbers or strings. A missing value is
/// modelled as `Option::None` on the owning field, an unparsable one as a
/// `Text` that yields `None` from [`RawValue::as_f64`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(v) if !v.is_nan() => Some(*v),
            RawValue::Number(_) => None,
            RawValue::Text(s) => parse_numeric(s),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// Pressure columns of the first card (hPa)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawPressureReading {
    pub station_level_pressure: Option<RawValue>,
    pub corrected_sea_level_pressure: Option<RawValue>,
}

/// Temperature columns of the first card, in tenths of a degree Celsius
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawTemperatureReading {
    pub dry_bulb_tenths: Option<RawValue>,
    pub wet_bulb_tenths: Option<RawValue>,
    pub dew_point_tenths: Option<RawValue>,
    /// Max or min thermometer as read; both extremes share this column
    pub max_min_tenths: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawWindReading {
    pub speed_knots: Option<RawValue>,
    /// Degrees from true north, 0-360
    pub direction_deg: Option<RawValue>,
}

/// One contiguous rainfall interval on the observation day (UTC).
///
/// `time_end` earlier than `time_start` means the rain continued past
/// midnight. Blank times are treated the same as absent ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub time_start: Option<String>,
    pub time_end: Option<String>,
}

impl TimeSlot {
    pub fn new(id: impl Into<String>, start: &str, end: &str) -> Self {
        Self {
            id: id.into(),
            time_start: Some(start.to_string()),
            time_end: Some(end.to_string()),
        }
    }

    pub fn start(&self) -> Option<&str> {
        self.time_start.as_deref().filter(|s| !s.is_empty())
    }

    pub fn end(&self) -> Option<&str> {
        self.time_end.as_deref().filter(|s| !s.is_empty())
    }
}

/// Second card observation: cloud, visibility, humidity, wind and rain
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawWeatherObservation {
    pub total_cloud_octa: Option<RawValue>,
    pub visibility_km: Option<RawValue>,
    pub humidity_pct: Option<RawValue>,
    pub rainfall_last_24h_mm: Option<RawValue>,
    pub rain_time_slots: Option<Vec<TimeSlot>>,
    pub legacy_rain_start: Option<DateTime<Utc>>,
    pub legacy_rain_end: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub wind: RawWindReading,
}

/// A stored first card: pressure and temperature readings for one hour slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FirstCardEntry {
    pub station_id: String,
    pub observed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub pressure: RawPressureReading,
    #[serde(flatten)]
    pub temperature: RawTemperatureReading,
}

/// A stored second card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecondCardEntry {
    pub station_id: String,
    pub observed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub observation: RawWeatherObservation,
}

/// Continuous/intermittent classification of a rainfall episode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RainfallType {
    Continuous,
    Intermittent,
    /// No slots entered yet
    #[default]
    #[serde(rename = "")]
    Unclassified,
}

impl RainfallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RainfallType::Continuous => "continuous",
            RainfallType::Intermittent => "intermittent",
            RainfallType::Unclassified => "",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RainfallEpisodeSummary {
    pub total_slots: usize,
    pub completed_slots: usize,
    pub total_minutes: i64,
    pub max_gap_minutes: i64,
    pub has_overlap: bool,
    pub classification: RainfallType,
}
