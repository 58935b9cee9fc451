//! Daily summary reduction
//!
//! Reduces one station-day of first and second card entries into the sixteen
//! columns of the daily summary card. Each column is filled only when at
//! least one valid reading contributes to it; otherwise it stays blank.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compass::{degrees_to_16pt_index, point_name};
use crate::fields::{SummaryField, FIELD_COUNT};
use crate::rain::{format_hhmm, sum_rain_minutes};
use crate::rollups::{Accumulator, AggregateType};
use crate::types::{RawPressureReading, RawTemperatureReading, RawWeatherObservation};
use crate::units::{
    format_integer, format_one_decimal, knots_to_meters_per_second, numeric, tenths_to_celsius,
};

/// Data type code written on summary cards
pub const SYNOPTIC_DATA_TYPE: &str = "SY";

/// The sixteen positional summary values, blank where there was no data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailySummaryRecord {
    fields: [String; FIELD_COUNT],
}

impl DailySummaryRecord {
    pub fn get(&self, field: SummaryField) -> &str {
        &self.fields[field.index()]
    }

    pub fn set(&mut self, field: SummaryField, value: String) {
        self.fields[field.index()] = value;
    }

    /// True when no column could be computed
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(String::is_empty)
    }
}

impl fmt::Display for DailySummaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fields.join("|"))
    }
}

/// Header and values of a daily summary card for one station-day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummaryForm {
    pub station_no: String,
    pub data_type: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub measurements: DailySummaryRecord,
}

impl DailySummaryForm {
    pub fn new(
        station_no: impl Into<String>,
        data_type: impl Into<String>,
        date: NaiveDate,
        measurements: DailySummaryRecord,
    ) -> Self {
        Self {
            station_no: station_no.into(),
            data_type: data_type.into(),
            year: date.year().to_string(),
            month: format!("{:02}", date.month()),
            day: format!("{:02}", date.day()),
            measurements,
        }
    }
}

/// Most frequent compass sector.
///
/// Counts are kept in first-seen order and only a strictly higher count
/// replaces the leader, so on a tie the sector that appeared first in the
/// input wins.
pub fn prevailing_direction(sectors: &[u8]) -> Option<u8> {
    let mut counts: Vec<(u8, usize)> = Vec::new();
    for &sector in sectors {
        match counts.iter_mut().find(|(s, _)| *s == sector) {
            Some((_, count)) => *count += 1,
            None => counts.push((sector, 1)),
        }
    }

    counts
        .into_iter()
        .fold(None, |best: Option<(u8, usize)>, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        })
        .map(|(sector, _)| sector)
}

/// Strongest wind reading in m/s and the sector it blew from.
///
/// The first of several equal maxima is kept. The sector is `None` when that
/// observation's direction does not parse.
pub fn strongest_wind(observations: &[RawWeatherObservation]) -> Option<(f64, Option<u8>)> {
    observations
        .iter()
        .filter_map(|obs| {
            let speed = knots_to_meters_per_second(obs.wind.speed_knots.as_ref())?;
            Some((speed, degrees_to_16pt_index(obs.wind.direction_deg.as_ref())))
        })
        .fold(None, |best, candidate| match best {
            Some(b) if candidate.0 <= b.0 => Some(b),
            _ => Some(candidate),
        })
}

/// Reduce one station-day of readings into the daily summary record.
///
/// Inputs must already be scoped to a single station; `reference_date` is the
/// UTC day rain slots are placed on.
pub fn compute_daily_summary(
    pressure: &[RawPressureReading],
    temperature: &[RawTemperatureReading],
    weather: &[RawWeatherObservation],
    reference_date: NaiveDate,
) -> DailySummaryRecord {
    let mut record = DailySummaryRecord::default();

    debug!(
        pressure = pressure.len(),
        temperature = temperature.len(),
        weather = weather.len(),
        %reference_date,
        "computing daily summary"
    );

    // Pressure (hPa)
    let station = Accumulator::from_readings(
        AggregateType::Avg,
        pressure
            .iter()
            .map(|p| numeric(p.station_level_pressure.as_ref())),
    );
    let sea_level = Accumulator::from_readings(
        AggregateType::Avg,
        pressure
            .iter()
            .map(|p| numeric(p.corrected_sea_level_pressure.as_ref())),
    );
    put(&mut record, SummaryField::AvgStationPressure, station.result(), format_integer);
    put(&mut record, SummaryField::AvgSeaLevelPressure, sea_level.result(), format_integer);

    // Temperatures (°C)
    let dry = Accumulator::from_readings(
        AggregateType::Avg,
        temperature
            .iter()
            .map(|t| tenths_to_celsius(t.dry_bulb_tenths.as_ref())),
    );
    let wet = Accumulator::from_readings(
        AggregateType::Avg,
        temperature
            .iter()
            .map(|t| tenths_to_celsius(t.wet_bulb_tenths.as_ref())),
    );
    let dew = Accumulator::from_readings(
        AggregateType::Avg,
        temperature
            .iter()
            .map(|t| tenths_to_celsius(t.dew_point_tenths.as_ref())),
    );
    // One pool feeds both extremes
    let extremes = Accumulator::from_readings(
        AggregateType::Max,
        temperature
            .iter()
            .map(|t| tenths_to_celsius(t.max_min_tenths.as_ref())),
    );
    debug!(
        dry = dry.count(),
        wet = wet.count(),
        dew = dew.count(),
        extremes = extremes.count(),
        "temperature readings accepted"
    );
    put(&mut record, SummaryField::AvgDryBulb, dry.result(), format_one_decimal);
    put(&mut record, SummaryField::AvgWetBulb, wet.result(), format_one_decimal);
    put(&mut record, SummaryField::MaxTemperature, extremes.result(), format_one_decimal);
    put(
        &mut record,
        SummaryField::MinTemperature,
        extremes.with_type(AggregateType::Min).result(),
        format_one_decimal,
    );
    put(&mut record, SummaryField::AvgDewPoint, dew.result(), format_one_decimal);

    // Precipitation (mm): a zero total is left blank
    let precipitation = Accumulator::from_readings(
        AggregateType::Sum,
        weather
            .iter()
            .map(|w| numeric(w.rainfall_last_24h_mm.as_ref())),
    );
    put(
        &mut record,
        SummaryField::TotalPrecipitation,
        precipitation.result().filter(|total| *total > 0.0),
        format_one_decimal,
    );

    let humidity = Accumulator::from_readings(
        AggregateType::Avg,
        weather.iter().map(|w| numeric(w.humidity_pct.as_ref())),
    );
    put(&mut record, SummaryField::AvgRelativeHumidity, humidity.result(), format_integer);

    let visibility = Accumulator::from_readings(
        AggregateType::Min,
        weather.iter().map(|w| numeric(w.visibility_km.as_ref())),
    );
    put(&mut record, SummaryField::LowestVisibility, visibility.result(), format_one_decimal);

    // Wind (m/s, 16-point sectors)
    let speed = Accumulator::from_readings(
        AggregateType::Avg,
        weather
            .iter()
            .map(|w| knots_to_meters_per_second(w.wind.speed_knots.as_ref())),
    );
    put(&mut record, SummaryField::AvgWindSpeed, speed.result(), format_one_decimal);

    let sectors: Vec<u8> = weather
        .iter()
        .filter_map(|w| degrees_to_16pt_index(w.wind.direction_deg.as_ref()))
        .collect();
    if let Some(prevailing) = prevailing_direction(&sectors) {
        debug!(sector = prevailing, point = point_name(prevailing), "prevailing wind");
        record.set(SummaryField::PrevailingWindDirection, prevailing.to_string());
    }

    if let Some((max_speed, sector)) = strongest_wind(weather) {
        record.set(SummaryField::MaxWindSpeed, format_one_decimal(max_speed));
        if let Some(sector) = sector {
            debug!(sector, point = point_name(sector), max_speed, "strongest wind");
            record.set(SummaryField::MaxWindDirection, sector.to_string());
        }
    }

    let cloud = Accumulator::from_readings(
        AggregateType::Avg,
        weather.iter().map(|w| numeric(w.total_cloud_octa.as_ref())),
    );
    put(&mut record, SummaryField::AvgTotalCloud, cloud.result(), format_integer);

    // Rain duration (HHMM)
    let rain_minutes: i64 = weather
        .iter()
        .map(|w| sum_rain_minutes(w, reference_date))
        .sum();
    if rain_minutes > 0 {
        record.set(SummaryField::RainDuration, format_hhmm(rain_minutes));
    }

    debug!(%record, rain_minutes, "daily summary computed");
    record
}

fn put(
    record: &mut DailySummaryRecord,
    field: SummaryField,
    value: Option<f64>,
    format: fn(f64) -> String,
) {
    if let Some(value) = value {
        record.set(field, format(value));
    }
}
