//! Accumulators for reducing sub-daily readings into one value

use crate::units::average;

/// Aggregation type for a summary column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateType {
    Min,
    Max,
    Sum,
    Avg,
}

/// Collects the valid readings for one summary column
#[derive(Debug, Clone)]
pub struct Accumulator {
    observations: Vec<f64>,
    aggregate_type: AggregateType,
}

impl Accumulator {
    pub fn new(aggregate_type: AggregateType) -> Self {
        Self {
            observations: Vec::new(),
            aggregate_type,
        }
    }

    /// Collect every `Some` value from an iterator of optional readings
    pub fn from_readings<I>(aggregate_type: AggregateType, readings: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut acc = Self::new(aggregate_type);
        for value in readings.into_iter().flatten() {
            acc.add(value);
        }
        acc
    }

    pub fn add(&mut self, value: f64) {
        self.observations.push(value);
    }

    /// Aggregate over the collected readings, `None` if nothing was collected
    pub fn result(&self) -> Option<f64> {
        if self.observations.is_empty() {
            return None;
        }

        Some(match self.aggregate_type {
            AggregateType::Min => self
                .observations
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min),
            AggregateType::Max => self
                .observations
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max),
            AggregateType::Sum => self.observations.iter().sum(),
            AggregateType::Avg => average(&self.observations),
        })
    }

    /// Same readings, different reduction
    pub fn with_type(&self, aggregate_type: AggregateType) -> Self {
        Self {
            observations: self.observations.clone(),
            aggregate_type,
        }
    }

    pub fn count(&self) -> usize {
        self.observations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_min() {
        let mut acc = Accumulator::new(AggregateType::Min);
        acc.add(10.0);
        acc.add(5.0);
        acc.add(15.0);
        assert_eq!(acc.result(), Some(5.0));
    }

    #[test]
    fn test_accumulator_max() {
        let acc = Accumulator::from_readings(AggregateType::Max, [Some(10.0), None, Some(15.0)]);
        assert_eq!(acc.result(), Some(15.0));
        assert_eq!(acc.count(), 2);
    }

    #[test]
    fn test_accumulator_avg() {
        let mut acc = Accumulator::new(AggregateType::Avg);
        acc.add(10.0);
        acc.add(20.0);
        acc.add(30.0);
        assert_eq!(acc.result(), Some(20.0));
        assert_eq!(acc.with_type(AggregateType::Sum).result(), Some(60.0));
    }

    #[test]
    fn test_accumulator_empty() {
        let acc = Accumulator::from_readings(AggregateType::Avg, [None, None]);
        assert_eq!(acc.result(), None);
        assert_eq!(acc.with_type(AggregateType::Sum).result(), None);
    }
}
