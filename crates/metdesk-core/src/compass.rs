//! 16-point compass bucketing for wind direction

use crate::types::RawValue;
use crate::units::numeric;

pub const COMPASS_POINTS: u8 = 16;
const SECTOR_WIDTH: f64 = 360.0 / COMPASS_POINTS as f64;

const POINT_NAMES: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Sector index 0..15 for a direction in degrees, 0 = North.
///
/// Sectors are centred on multiples of 22.5°, so North covers
/// [348.75°, 11.25°). Any finite angle is accepted and normalised first.
pub fn bucket_degrees(deg: f64) -> Option<u8> {
    if !deg.is_finite() {
        return None;
    }
    let normalized = ((deg % 360.0) + 360.0) % 360.0;
    let index = ((normalized + SECTOR_WIDTH / 2.0) / SECTOR_WIDTH).floor() as u32;
    Some((index % COMPASS_POINTS as u32) as u8)
}

/// Sector index for a raw direction column, `None` when it does not parse
pub fn degrees_to_16pt_index(raw: Option<&RawValue>) -> Option<u8> {
    numeric(raw).and_then(bucket_degrees)
}

pub fn point_name(index: u8) -> Option<&'static str> {
    POINT_NAMES.get(index as usize).copied()
}
