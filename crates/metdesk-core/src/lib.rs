//! Derived-metrics core for meteorological station data entry
//!
//! Reduces raw synoptic card entries into the daily summary card and
//! classifies rainfall episodes. Everything here is pure computation over
//! already-fetched records; storage and presentation live elsewhere.

pub mod calendar;
pub mod compass;
pub mod episode;
pub mod fields;
pub mod pipeline;
pub mod rain;
pub mod rollups;
pub mod summary;
pub mod types;
pub mod units;

pub use calendar::*;
pub use compass::*;
pub use episode::*;
pub use fields::*;
pub use pipeline::*;
pub use rain::*;
pub use rollups::*;
pub use summary::*;
pub use types::*;
pub use units::*;

use thiserror::Error;

/// Structural input errors a caller may ask the core to check for
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid reference date: {0}")]
    InvalidDate(String),

    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    #[error("Invalid observation hour: {0}")]
    InvalidObservationHour(String),

    #[error("Duplicate time slot id: {0}")]
    DuplicateSlotId(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
