//! View models for the three dashboard tabs.
//!
//! Each tab model is a pure function of the selected plot and the rows the
//! gateway returned; nothing here touches the database. Every model echoes
//! the `plot_id` it was built for so the page can discard responses that
//! arrive after the selection has moved on.

use serde::Serialize;
use time::{Date, OffsetDateTime};

use agrodash_types::{SensorLog, WeatherSuggestion, transform};

/// Display range of the phosphorus gauge, in mg/kg.
pub const PHOSPHORUS_RANGE: (f64, f64) = (0.0, 50.0);
/// Display range of the potassium gauge, in mg/kg.
pub const POTASSIUM_RANGE: (f64, f64) = (0.0, 60.0);
/// Display range of the pH gauge.
pub const PH_RANGE: (f64, f64) = (0.0, 14.0);

/// Sentinel shown when a plot has no sensor logs at all.
pub const STATUS_UNKNOWN: &str = "unknown";

/// One point of a timestamped numeric series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// When the reading was taken.
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    /// Reading value.
    pub value: f64,
}

/// One point of the binary irrigation series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusPoint {
    /// When the reading was taken.
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    /// 1 when irrigation was ON, 0 otherwise.
    pub value: u8,
}

/// A single-value indicator with a fixed display range.
///
/// `value: None` means "no data" (or no selection) and must be rendered as
/// an explicit neutral state, never as a genuine zero reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    /// Display label.
    pub label: &'static str,
    /// Mean value over the fetched series, if any rows exist.
    pub value: Option<f64>,
    /// Lower bound of the display range.
    pub min: f64,
    /// Upper bound of the display range.
    pub max: f64,
    /// Unit suffix for display.
    pub unit: &'static str,
}

impl Gauge {
    fn phosphorus(value: Option<f64>) -> Self {
        Self {
            label: "Phosphorus (P)",
            value,
            min: PHOSPHORUS_RANGE.0,
            max: PHOSPHORUS_RANGE.1,
            unit: "mg/kg",
        }
    }

    fn potassium(value: Option<f64>) -> Self {
        Self {
            label: "Potassium (K)",
            value,
            min: POTASSIUM_RANGE.0,
            max: POTASSIUM_RANGE.1,
            unit: "mg/kg",
        }
    }

    fn ph(value: Option<f64>) -> Self {
        Self {
            label: "pH",
            value,
            min: PH_RANGE.0,
            max: PH_RANGE.1,
            unit: "",
        }
    }
}

/// Badge color for the latest irrigation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    /// Irrigation is running.
    Success,
    /// Irrigation is off or in an unrecognized state.
    Danger,
    /// No data to judge from.
    Neutral,
}

/// Sensor tab: humidity series plus the three soil gauges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorTab {
    /// Selection this model was built for.
    pub plot_id: Option<i64>,
    /// Soil humidity over time, oldest first.
    pub humidity_series: Vec<SeriesPoint>,
    /// Mean phosphorus gauge.
    pub phosphorus: Gauge,
    /// Mean potassium gauge.
    pub potassium: Gauge,
    /// Mean pH gauge.
    pub ph: Gauge,
}

impl SensorTab {
    /// Neutral model: empty series, every gauge at "no data".
    pub fn empty(plot_id: Option<i64>) -> Self {
        Self {
            plot_id,
            humidity_series: Vec::new(),
            phosphorus: Gauge::phosphorus(None),
            potassium: Gauge::potassium(None),
            ph: Gauge::ph(None),
        }
    }

    /// Build the model from fetched sensor rows.
    pub fn build(plot_id: i64, rows: &[SensorLog]) -> Self {
        let humidity_series = rows
            .iter()
            .map(|row| SeriesPoint {
                at: row.log_timestamp,
                value: row.humidity,
            })
            .collect();

        let phosphorus: Vec<f64> = rows.iter().map(|r| r.phosphorus_p).collect();
        let potassium: Vec<f64> = rows.iter().map(|r| r.potassium_k).collect();
        let ph: Vec<f64> = rows.iter().map(|r| r.ph_level).collect();

        Self {
            plot_id: Some(plot_id),
            humidity_series,
            phosphorus: Gauge::phosphorus(transform::mean(&phosphorus)),
            potassium: Gauge::potassium(transform::mean(&potassium)),
            ph: Gauge::ph(transform::mean(&ph)),
        }
    }
}

/// Irrigation tab: binary status series plus the latest-status badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrrigationTab {
    /// Selection this model was built for.
    pub plot_id: Option<i64>,
    /// ON/OFF series as 1/0, oldest first.
    pub status_series: Vec<StatusPoint>,
    /// Normalized text of the newest log, or `"unknown"` without rows.
    pub latest_status: String,
    /// Badge color for the latest status.
    pub badge: BadgeColor,
}

impl IrrigationTab {
    /// Neutral model: empty series, unknown status.
    pub fn empty(plot_id: Option<i64>) -> Self {
        Self {
            plot_id,
            status_series: Vec::new(),
            latest_status: STATUS_UNKNOWN.to_string(),
            badge: BadgeColor::Neutral,
        }
    }

    /// Build the model from fetched rows and the latest status.
    ///
    /// The latest status keeps its literal normalized text even when it is
    /// neither "ON" nor "OFF"; only the badge collapses unrecognized states
    /// to the alert color.
    pub fn build(plot_id: i64, rows: &[SensorLog], latest: Option<String>) -> Self {
        let status_series = transform::status_series(rows)
            .into_iter()
            .map(|(at, value)| StatusPoint { at, value })
            .collect();

        let badge = match latest.as_deref() {
            Some("ON") => BadgeColor::Success,
            Some(_) => BadgeColor::Danger,
            None => BadgeColor::Neutral,
        };

        Self {
            plot_id: Some(plot_id),
            status_series,
            latest_status: latest.unwrap_or_else(|| STATUS_UNKNOWN.to_string()),
            badge,
        }
    }
}

/// A suggestion row projected to its display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionRow {
    /// Forecast day.
    pub forecast_date: Date,
    /// Forecast minimum temperature in Celsius.
    pub min_temp_celsius: f64,
    /// Forecast maximum temperature in Celsius.
    pub max_temp_celsius: f64,
    /// Forecast precipitation in millimetres.
    pub precipitation_mm: f64,
    /// Suggested action.
    pub suggested_action: String,
    /// Reason text.
    pub reason: String,
}

/// One bar of the action-frequency chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionCount {
    /// Suggested action.
    pub action: String,
    /// Number of rows suggesting it.
    pub count: u64,
}

/// Suggestions tab: projected table rows plus action frequency bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionsTab {
    /// Selection this model was built for.
    pub plot_id: Option<i64>,
    /// Table rows, ordered by forecast date.
    pub rows: Vec<SuggestionRow>,
    /// Action counts, descending; ties keep first-occurrence order.
    pub action_frequency: Vec<ActionCount>,
}

impl SuggestionsTab {
    /// Neutral model: no rows, no bars.
    pub fn empty(plot_id: Option<i64>) -> Self {
        Self {
            plot_id,
            rows: Vec::new(),
            action_frequency: Vec::new(),
        }
    }

    /// Build the model from fetched suggestion rows.
    pub fn build(plot_id: i64, rows: &[WeatherSuggestion]) -> Self {
        let projected = rows
            .iter()
            .map(|row| SuggestionRow {
                forecast_date: row.forecast_date,
                min_temp_celsius: row.min_temp_celsius,
                max_temp_celsius: row.max_temp_celsius,
                precipitation_mm: row.precipitation_mm,
                suggested_action: row.suggested_action.clone(),
                reason: row.reason.clone(),
            })
            .collect();

        let mut action_frequency: Vec<ActionCount> = transform::action_frequency(rows)
            .into_iter()
            .map(|(action, count)| ActionCount { action, count })
            .collect();
        // Stable sort keeps first-occurrence order among equal counts.
        action_frequency.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            plot_id: Some(plot_id),
            rows: projected,
            action_frequency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn sensor_log(
        log_id: i64,
        timestamp: OffsetDateTime,
        humidity: f64,
        phosphorus: f64,
        status: &str,
    ) -> SensorLog {
        SensorLog {
            log_id,
            plot_id: 7,
            log_timestamp: timestamp,
            humidity,
            phosphorus_p: phosphorus,
            potassium_k: 30.0,
            ph_level: 6.5,
            irrigation_status: status.to_string(),
        }
    }

    fn suggestion(suggestion_id: i64, day: Date, action: &str) -> WeatherSuggestion {
        WeatherSuggestion {
            suggestion_id,
            plot_id: 7,
            forecast_date: day,
            min_temp_celsius: 12.0,
            max_temp_celsius: 27.0,
            precipitation_mm: 1.5,
            suggested_action: action.to_string(),
            reason: "test".to_string(),
        }
    }

    #[test]
    fn no_selection_yields_neutral_models() {
        let sensors = SensorTab::empty(None);
        assert!(sensors.humidity_series.is_empty());
        assert_eq!(sensors.phosphorus.value, None);
        assert_eq!(sensors.potassium.value, None);
        assert_eq!(sensors.ph.value, None);

        let irrigation = IrrigationTab::empty(None);
        assert!(irrigation.status_series.is_empty());
        assert_eq!(irrigation.latest_status, "unknown");
        assert_eq!(irrigation.badge, BadgeColor::Neutral);

        let suggestions = SuggestionsTab::empty(None);
        assert!(suggestions.rows.is_empty());
        assert!(suggestions.action_frequency.is_empty());
    }

    #[test]
    fn sensor_tab_series_and_means() {
        let rows = vec![
            sensor_log(1, datetime!(2024-05-01 06:00:00 UTC), 40.0, 10.0, "ON"),
            sensor_log(2, datetime!(2024-05-01 07:00:00 UTC), 42.0, 20.0, "ON"),
            sensor_log(3, datetime!(2024-05-01 08:00:00 UTC), 44.0, 30.0, "OFF"),
        ];

        let tab = SensorTab::build(7, &rows);
        assert_eq!(tab.plot_id, Some(7));
        assert_eq!(tab.humidity_series.len(), 3);
        assert_eq!(tab.humidity_series[0].value, 40.0);
        assert_eq!(
            tab.humidity_series[2].at,
            datetime!(2024-05-01 08:00:00 UTC)
        );
        assert_eq!(tab.phosphorus.value, Some(20.0));
        assert_eq!((tab.phosphorus.min, tab.phosphorus.max), (0.0, 50.0));
        assert_eq!((tab.potassium.min, tab.potassium.max), (0.0, 60.0));
        assert_eq!((tab.ph.min, tab.ph.max), (0.0, 14.0));
    }

    #[test]
    fn sensor_tab_without_rows_has_no_data_gauges() {
        let tab = SensorTab::build(7, &[]);
        assert_eq!(tab.plot_id, Some(7));
        assert!(tab.humidity_series.is_empty());
        assert_eq!(tab.phosphorus.value, None);
    }

    #[test]
    fn irrigation_tab_binary_series_and_badge() {
        let rows = vec![
            sensor_log(1, datetime!(2024-05-01 06:00:00 UTC), 40.0, 10.0, "ON"),
            sensor_log(2, datetime!(2024-05-01 07:00:00 UTC), 42.0, 20.0, "OFF"),
            sensor_log(3, datetime!(2024-05-01 08:00:00 UTC), 44.0, 30.0, "ON"),
        ];

        let tab = IrrigationTab::build(7, &rows, Some("ON".to_string()));
        let values: Vec<u8> = tab.status_series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1, 0, 1]);
        assert_eq!(tab.latest_status, "ON");
        assert_eq!(tab.badge, BadgeColor::Success);
    }

    #[test]
    fn irrigation_badge_colors() {
        let off = IrrigationTab::build(7, &[], Some("OFF".to_string()));
        assert_eq!(off.badge, BadgeColor::Danger);

        // Unrecognized states keep their text but take the alert color.
        let odd = IrrigationTab::build(7, &[], Some("STANDBY".to_string()));
        assert_eq!(odd.latest_status, "STANDBY");
        assert_eq!(odd.badge, BadgeColor::Danger);

        let unknown = IrrigationTab::build(7, &[], None);
        assert_eq!(unknown.latest_status, "unknown");
        assert_eq!(unknown.badge, BadgeColor::Neutral);
    }

    #[test]
    fn suggestions_tab_without_rows_is_well_defined() {
        let tab = SuggestionsTab::build(9, &[]);
        assert_eq!(tab.plot_id, Some(9));
        assert!(tab.rows.is_empty());
        assert!(tab.action_frequency.is_empty());
    }

    #[test]
    fn suggestions_tab_projects_rows_and_sorts_frequency() {
        let rows = vec![
            suggestion(1, date!(2024 - 05 - 02), "FERTILIZE"),
            suggestion(2, date!(2024 - 05 - 03), "IRRIGATE"),
            suggestion(3, date!(2024 - 05 - 04), "IRRIGATE"),
            suggestion(4, date!(2024 - 05 - 05), "SCOUT PESTS"),
        ];

        let tab = SuggestionsTab::build(7, &rows);
        assert_eq!(tab.rows.len(), 4);
        assert_eq!(tab.rows[0].forecast_date, date!(2024 - 05 - 02));

        let bars: Vec<(&str, u64)> = tab
            .action_frequency
            .iter()
            .map(|a| (a.action.as_str(), a.count))
            .collect();
        // IRRIGATE leads; the 1-count ties keep first-occurrence order.
        assert_eq!(
            bars,
            vec![("IRRIGATE", 2), ("FERTILIZE", 1), ("SCOUT PESTS", 1)]
        );
    }
}
