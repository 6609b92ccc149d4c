//! Records read from the monitoring database.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// A monitored field plot.
///
/// Reference data created and managed outside this system.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plot {
    /// Unique plot identifier.
    pub plot_id: i64,
    /// Human-readable plot name.
    pub plot_name: String,
}

/// A single sensor log row for a plot.
///
/// Rows are append-only and ordered by `log_timestamp` ascending when
/// fetched. The irrigation status is normalized (trimmed, upper-cased)
/// at the query boundary; the literal text is kept so the latest-status
/// display can show whatever the sensor actually reported.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorLog {
    /// Database row id.
    pub log_id: i64,
    /// Plot this reading belongs to.
    pub plot_id: i64,
    /// When the reading was taken.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub log_timestamp: OffsetDateTime,
    /// Soil humidity in percent.
    pub humidity: f64,
    /// Phosphorus concentration in mg/kg.
    pub phosphorus_p: f64,
    /// Potassium concentration in mg/kg.
    pub potassium_k: f64,
    /// Soil pH.
    pub ph_level: f64,
    /// Normalized irrigation status text ("ON", "OFF", or whatever the
    /// sensor reported, upper-cased and trimmed).
    pub irrigation_status: String,
}

/// A weather-driven action suggestion for a plot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeatherSuggestion {
    /// Database row id.
    pub suggestion_id: i64,
    /// Plot this suggestion applies to.
    pub plot_id: i64,
    /// Forecast day the suggestion covers.
    pub forecast_date: Date,
    /// Forecast minimum temperature in Celsius.
    pub min_temp_celsius: f64,
    /// Forecast maximum temperature in Celsius.
    pub max_temp_celsius: f64,
    /// Forecast precipitation in millimetres.
    pub precipitation_mm: f64,
    /// Suggested action, upper-cased and trimmed.
    pub suggested_action: String,
    /// Free-text reason for the suggestion.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn sensor_log_serializes_timestamp_as_rfc3339() {
        let log = SensorLog {
            log_id: 1,
            plot_id: 7,
            log_timestamp: datetime!(2024-05-01 06:30:00 UTC),
            humidity: 41.5,
            phosphorus_p: 12.0,
            potassium_k: 30.0,
            ph_level: 6.8,
            irrigation_status: "ON".to_string(),
        };

        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["log_timestamp"], "2024-05-01T06:30:00Z");
        assert_eq!(json["irrigation_status"], "ON");
    }

    #[test]
    fn suggestion_serializes_date_as_iso() {
        let suggestion = WeatherSuggestion {
            suggestion_id: 1,
            plot_id: 7,
            forecast_date: date!(2024 - 05 - 02),
            min_temp_celsius: 12.0,
            max_temp_celsius: 27.5,
            precipitation_mm: 0.0,
            suggested_action: "IRRIGATE".to_string(),
            reason: "Dry week ahead".to_string(),
        };

        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["forecast_date"], "2024-05-02");
    }
}
