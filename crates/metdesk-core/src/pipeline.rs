use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::calendar::{day_window, DayWindow};
use crate::summary::{compute_daily_summary, DailySummaryForm};
use crate::types::{FirstCardEntry, SecondCardEntry};

/// Where stored card entries come from.
///
/// Implementations return only entries of `station_id` observed inside
/// `window`; the aggregator does no filtering of its own.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    async fn first_card_entries(
        &self,
        station_id: &str,
        window: &DayWindow,
    ) -> Result<Vec<FirstCardEntry>>;

    async fn second_card_entries(
        &self,
        station_id: &str,
        window: &DayWindow,
    ) -> Result<Vec<SecondCardEntry>>;
}

/// Fetch one station-day from `source` and build its summary card
#[instrument(skip(source))]
pub async fn summarize_day<S>(
    source: &S,
    station_id: &str,
    date: NaiveDate,
    data_type: &str,
) -> Result<DailySummaryForm>
where
    S: RecordSource + ?Sized,
{
    let window = day_window(date);
    let first = source.first_card_entries(station_id, &window).await?;
    let second = source.second_card_entries(station_id, &window).await?;

    let pressure: Vec<_> = first.iter().map(|e| e.pressure.clone()).collect();
    let temperature: Vec<_> = first.iter().map(|e| e.temperature.clone()).collect();
    let weather: Vec<_> = second.into_iter().map(|e| e.observation).collect();

    let measurements = compute_daily_summary(&pressure, &temperature, &weather, date);
    info!(
        first_cards = first.len(),
        second_cards = weather.len(),
        "daily summary built"
    );

    Ok(DailySummaryForm::new(station_id, data_type, date, measurements))
}
