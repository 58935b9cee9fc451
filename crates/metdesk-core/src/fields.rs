//! The sixteen columns of the daily summary card

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    Pressure,
    Temperature,
    Precipitation,
    Humidity,
    Wind,
    Cloud,
    Visibility,
}

/// Position of a value in the daily summary record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SummaryField {
    AvgStationPressure,
    AvgSeaLevelPressure,
    AvgDryBulb,
    AvgWetBulb,
    MaxTemperature,
    MinTemperature,
    TotalPrecipitation,
    AvgDewPoint,
    AvgRelativeHumidity,
    AvgWindSpeed,
    PrevailingWindDirection,
    MaxWindSpeed,
    MaxWindDirection,
    AvgTotalCloud,
    LowestVisibility,
    RainDuration,
}

pub const FIELD_COUNT: usize = 16;

impl SummaryField {
    pub const ALL: [SummaryField; FIELD_COUNT] = [
        SummaryField::AvgStationPressure,
        SummaryField::AvgSeaLevelPressure,
        SummaryField::AvgDryBulb,
        SummaryField::AvgWetBulb,
        SummaryField::MaxTemperature,
        SummaryField::MinTemperature,
        SummaryField::TotalPrecipitation,
        SummaryField::AvgDewPoint,
        SummaryField::AvgRelativeHumidity,
        SummaryField::AvgWindSpeed,
        SummaryField::PrevailingWindDirection,
        SummaryField::MaxWindSpeed,
        SummaryField::MaxWindDirection,
        SummaryField::AvgTotalCloud,
        SummaryField::LowestVisibility,
        SummaryField::RainDuration,
    ];

    /// Zero-based position in the record
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            SummaryField::AvgStationPressure => "Av. Station Pressure",
            SummaryField::AvgSeaLevelPressure => "Av. Sea-Level Pressure",
            SummaryField::AvgDryBulb => "Av. Dry-Bulb Temperature",
            SummaryField::AvgWetBulb => "Av. Wet Bulb Temperature",
            SummaryField::MaxTemperature => "Max. Temperature",
            SummaryField::MinTemperature => "Min Temperature",
            SummaryField::TotalPrecipitation => "Total Precipitation",
            SummaryField::AvgDewPoint => "Av. Dew Point Temperature",
            SummaryField::AvgRelativeHumidity => "Av. Rel Humidity",
            SummaryField::AvgWindSpeed => "Av. Wind Speed",
            SummaryField::PrevailingWindDirection => "Prevailing Wind Direction",
            SummaryField::MaxWindSpeed => "Max Wind Speed",
            SummaryField::MaxWindDirection => "Direction of Max Wind",
            SummaryField::AvgTotalCloud => "Av. Total Cloud",
            SummaryField::LowestVisibility => "Lowest visibility",
            SummaryField::RainDuration => "Total Duration of Rain",
        }
    }

    /// Card column range the value is written into
    pub fn columns(self) -> &'static str {
        match self {
            SummaryField::AvgStationPressure => "14-18",
            SummaryField::AvgSeaLevelPressure => "19-23",
            SummaryField::AvgDryBulb => "24-26",
            SummaryField::AvgWetBulb => "27-29",
            SummaryField::MaxTemperature => "30-32",
            SummaryField::MinTemperature => "33-35",
            SummaryField::TotalPrecipitation => "36-39",
            SummaryField::AvgDewPoint => "40-42",
            SummaryField::AvgRelativeHumidity => "43-45",
            SummaryField::AvgWindSpeed => "46-48",
            SummaryField::PrevailingWindDirection => "49-50",
            SummaryField::MaxWindSpeed => "51-53",
            SummaryField::MaxWindDirection => "54-55",
            SummaryField::AvgTotalCloud => "56",
            SummaryField::LowestVisibility => "57-59",
            SummaryField::RainDuration => "60-63",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            SummaryField::AvgStationPressure | SummaryField::AvgSeaLevelPressure => "hPa",
            SummaryField::AvgDryBulb
            | SummaryField::AvgWetBulb
            | SummaryField::MaxTemperature
            | SummaryField::MinTemperature
            | SummaryField::AvgDewPoint => "°C",
            SummaryField::TotalPrecipitation => "mm",
            SummaryField::AvgRelativeHumidity => "%",
            SummaryField::AvgWindSpeed | SummaryField::MaxWindSpeed => "m/s",
            SummaryField::PrevailingWindDirection | SummaryField::MaxWindDirection => "16Pts",
            SummaryField::AvgTotalCloud => "octas",
            SummaryField::LowestVisibility => "km",
            SummaryField::RainDuration => "H-M",
        }
    }

    pub fn category(self) -> FieldCategory {
        match self {
            SummaryField::AvgStationPressure | SummaryField::AvgSeaLevelPressure => {
                FieldCategory::Pressure
            }
            SummaryField::AvgDryBulb
            | SummaryField::AvgWetBulb
            | SummaryField::MaxTemperature
            | SummaryField::MinTemperature
            | SummaryField::AvgDewPoint => FieldCategory::Temperature,
            SummaryField::TotalPrecipitation | SummaryField::RainDuration => {
                FieldCategory::Precipitation
            }
            SummaryField::AvgRelativeHumidity => FieldCategory::Humidity,
            SummaryField::AvgWindSpeed
            | SummaryField::PrevailingWindDirection
            | SummaryField::MaxWindSpeed
            | SummaryField::MaxWindDirection => FieldCategory::Wind,
            SummaryField::AvgTotalCloud => FieldCategory::Cloud,
            SummaryField::LowestVisibility => FieldCategory::Visibility,
        }
    }
}

/// Display metadata for one column, as served to form renderers
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub id: usize,
    pub field: SummaryField,
    pub label: &'static str,
    pub range: &'static str,
    pub unit: &'static str,
    pub category: FieldCategory,
}

impl From<SummaryField> for FieldDescriptor {
    fn from(field: SummaryField) -> Self {
        Self {
            id: field.index(),
            field,
            label: field.label(),
            range: field.columns(),
            unit: field.unit(),
            category: field.category(),
        }
    }
}

pub fn field_catalogue() -> Vec<FieldDescriptor> {
    SummaryField::ALL.into_iter().map(FieldDescriptor::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_card_order() {
        for (i, field) in SummaryField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
        assert_eq!(SummaryField::RainDuration.index(), 15);
    }

    #[test]
    fn test_catalogue_metadata() {
        let catalogue = field_catalogue();
        assert_eq!(catalogue.len(), FIELD_COUNT);
        assert_eq!(catalogue[6].label, "Total Precipitation");
        assert_eq!(catalogue[13].range, "56");
        assert_eq!(catalogue[15].category, FieldCategory::Precipitation);
        assert_eq!(catalogue[10].unit, "16Pts");
    }
}
