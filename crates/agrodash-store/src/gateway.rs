//! Query gateway implementation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use tracing::{debug, warn};

use agrodash_types::{Plot, SensorLog, WeatherSuggestion, transform};

use crate::error::{Error, Result};

/// Default busy timeout for read queries.
///
/// The field-logging pipeline writes to the same file; a locked database
/// should surface as an error after this long instead of hanging a request.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Read-only gateway to the monitoring database.
///
/// Holds only the database path; every operation opens its own short-lived
/// connection, so no connection is held across requests or re-renders.
#[derive(Debug, Clone)]
pub struct Gateway {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Gateway {
    /// Create a gateway for the database at the given path.
    ///
    /// The path is not touched until the first query.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Override the busy timeout applied to every connection.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// The database path this gateway reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only connection for a single query.
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| Error::Open {
            path: self.path.clone(),
            source: e,
        })?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    /// List all plots, ordered by name, for the selector control.
    pub fn list_plots(&self) -> Result<Vec<Plot>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT plot_id, plot_name FROM PLOT_LOCATIONS ORDER BY plot_name",
        )?;

        let plots = stmt
            .query_map([], |row| {
                Ok(Plot {
                    plot_id: row.get(0)?,
                    plot_name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Fetched {} plots", plots.len());
        Ok(plots)
    }

    /// Fetch the full sensor series for a plot, oldest first.
    ///
    /// Irrigation status is normalized on the way out. Rows whose
    /// timestamp cannot be parsed are dropped and logged rather than
    /// failing the whole fetch.
    pub fn sensor_series(&self, plot_id: i64) -> Result<Vec<SensorLog>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT log_id, plot_id, log_timestamp, humidity, phosphorus_p,
                    potassium_k, ph_level, irrigation_status
             FROM SENSOR_LOGS
             WHERE plot_id = ?1
             ORDER BY log_timestamp",
        )?;

        let raw = stmt
            .query_map([plot_id], |row| {
                Ok(RawSensorRow {
                    log_id: row.get(0)?,
                    plot_id: row.get(1)?,
                    log_timestamp: row.get(2)?,
                    humidity: row.get(3)?,
                    phosphorus_p: row.get(4)?,
                    potassium_k: row.get(5)?,
                    ph_level: row.get(6)?,
                    irrigation_status: row.get(7)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut logs = Vec::with_capacity(raw.len());
        for row in raw {
            match transform::parse_timestamp(&row.log_timestamp) {
                Ok(ts) => logs.push(SensorLog {
                    log_id: row.log_id,
                    plot_id: row.plot_id,
                    log_timestamp: ts,
                    humidity: row.humidity,
                    phosphorus_p: row.phosphorus_p,
                    potassium_k: row.potassium_k,
                    ph_level: row.ph_level,
                    irrigation_status: transform::normalize_status(&row.irrigation_status),
                }),
                Err(e) => warn!("Dropping sensor log {}: {}", row.log_id, e),
            }
        }

        debug!("Fetched {} sensor logs for plot {}", logs.len(), plot_id);
        Ok(logs)
    }

    /// Normalized status of the newest sensor log for a plot.
    ///
    /// `None` when the plot has no logs at all.
    pub fn latest_irrigation_status(&self, plot_id: i64) -> Result<Option<String>> {
        let conn = self.connect()?;
        let status = conn
            .query_row(
                "SELECT irrigation_status
                 FROM SENSOR_LOGS
                 WHERE plot_id = ?1
                 ORDER BY log_timestamp DESC
                 LIMIT 1",
                [plot_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(status.map(|s| transform::normalize_status(&s)))
    }

    /// Fetch weather suggestions for a plot, ordered by forecast date.
    ///
    /// Suggested actions are normalized; rows with an unparsable forecast
    /// date are dropped and logged.
    pub fn suggestions(&self, plot_id: i64) -> Result<Vec<WeatherSuggestion>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT suggestion_id, plot_id, forecast_date, min_temp_celsius,
                    max_temp_celsius, precipitation_mm, suggested_action, reason
             FROM WEATHER_SUGGESTIONS
             WHERE plot_id = ?1
             ORDER BY forecast_date",
        )?;

        let raw = stmt
            .query_map([plot_id], |row| {
                Ok(RawSuggestionRow {
                    suggestion_id: row.get(0)?,
                    plot_id: row.get(1)?,
                    forecast_date: row.get(2)?,
                    min_temp_celsius: row.get(3)?,
                    max_temp_celsius: row.get(4)?,
                    precipitation_mm: row.get(5)?,
                    suggested_action: row.get(6)?,
                    reason: row.get(7)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut suggestions = Vec::with_capacity(raw.len());
        for row in raw {
            match transform::parse_date(&row.forecast_date) {
                Ok(date) => suggestions.push(WeatherSuggestion {
                    suggestion_id: row.suggestion_id,
                    plot_id: row.plot_id,
                    forecast_date: date,
                    min_temp_celsius: row.min_temp_celsius,
                    max_temp_celsius: row.max_temp_celsius,
                    precipitation_mm: row.precipitation_mm,
                    suggested_action: transform::normalize_status(&row.suggested_action),
                    reason: row.reason,
                }),
                Err(e) => warn!("Dropping suggestion {}: {}", row.suggestion_id, e),
            }
        }

        debug!(
            "Fetched {} suggestions for plot {}",
            suggestions.len(),
            plot_id
        );
        Ok(suggestions)
    }
}

/// Sensor row as the driver hands it over, before timestamp parsing.
struct RawSensorRow {
    log_id: i64,
    plot_id: i64,
    log_timestamp: String,
    humidity: f64,
    phosphorus_p: f64,
    potassium_k: f64,
    ph_level: f64,
    irrigation_status: String,
}

/// Suggestion row as the driver hands it over, before date parsing.
struct RawSuggestionRow {
    suggestion_id: i64,
    plot_id: i64,
    forecast_date: String,
    min_temp_celsius: f64,
    max_temp_celsius: f64,
    precipitation_mm: f64,
    suggested_action: String,
    reason: String,
}
