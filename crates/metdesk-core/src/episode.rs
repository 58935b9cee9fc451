//! Continuous/intermittent classification of a rainfall episode

use std::collections::HashSet;

use crate::rain::{clock_minutes, parse_clock, MINUTES_PER_DAY};
use crate::types::{RainfallEpisodeSummary, RainfallType, TimeSlot};
use crate::{CoreError, CoreResult};

/// A dry gap of at least this many minutes makes rain intermittent
pub const DEFAULT_INTERMITTENT_GAP_MINUTES: i64 = 30;

/// Minutes from start to end, wrapping past midnight. Unreadable times
/// contribute nothing.
fn diff_minutes(start: &str, end: &str) -> i64 {
    match (clock_minutes(start), clock_minutes(end)) {
        (Some(s), Some(e)) if e >= s => e - s,
        (Some(s), Some(e)) => e + MINUTES_PER_DAY - s,
        _ => 0,
    }
}

/// Minutes between one slot's end and the next slot's start on the same
/// day. Negative means the slots overlap.
fn gap_minutes(end: &str, next_start: &str) -> i64 {
    match (clock_minutes(end), clock_minutes(next_start)) {
        (Some(e), Some(n)) => n - e,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotClassifier {
    gap_threshold_minutes: i64,
}

impl Default for SlotClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_INTERMITTENT_GAP_MINUTES)
    }
}

impl SlotClassifier {
    pub fn new(gap_threshold_minutes: i64) -> Self {
        Self {
            gap_threshold_minutes,
        }
    }

    pub fn gap_threshold_minutes(&self) -> i64 {
        self.gap_threshold_minutes
    }

    /// Summarise and classify the slots of one rainfall episode.
    ///
    /// Slots are ordered by start time. Overlapping minutes are not merged:
    /// each complete slot adds its own duration to the total. Gaps are taken
    /// between neighbours without midnight rollover.
    pub fn classify(&self, slots: &[TimeSlot]) -> RainfallEpisodeSummary {
        if slots.is_empty() {
            return RainfallEpisodeSummary::default();
        }

        let mut sorted: Vec<&TimeSlot> = slots.iter().collect();
        sorted.sort_by(|a, b| a.start().unwrap_or("").cmp(b.start().unwrap_or("")));

        let mut completed_slots = 0;
        let mut total_minutes = 0;
        for slot in &sorted {
            if let (Some(start), Some(end)) = (slot.start(), slot.end()) {
                completed_slots += 1;
                total_minutes += diff_minutes(start, end);
            }
        }

        let gaps: Vec<i64> = sorted
            .windows(2)
            .filter_map(|pair| Some(gap_minutes(pair[0].end()?, pair[1].start()?)))
            .collect();

        let classification = if gaps.iter().any(|g| *g >= self.gap_threshold_minutes) {
            RainfallType::Intermittent
        } else {
            RainfallType::Continuous
        };

        RainfallEpisodeSummary {
            total_slots: slots.len(),
            completed_slots,
            total_minutes,
            max_gap_minutes: gaps.iter().copied().max().unwrap_or(0),
            has_overlap: gaps.iter().any(|g| *g < 0),
            classification,
        }
    }
}

/// Classify with the standard 30 minute gap threshold
pub fn classify_slots(slots: &[TimeSlot]) -> RainfallEpisodeSummary {
    SlotClassifier::default().classify(slots)
}

/// Reject slot lists a form should never submit: duplicate ids or times
/// that are present but not "HH:MM".
pub fn validate_slots(slots: &[TimeSlot]) -> CoreResult<()> {
    let mut seen = HashSet::new();
    for slot in slots {
        if !seen.insert(slot.id.as_str()) {
            return Err(CoreError::DuplicateSlotId(slot.id.clone()));
        }
        for time in [slot.start(), slot.end()].into_iter().flatten() {
            parse_clock(time)?;
        }
    }
    Ok(())
}
