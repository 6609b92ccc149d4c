//! HTTP dashboard service for AgroDash field monitoring.
//!
//! This crate wires the read-only query gateway to a small axum API and an
//! embedded single-page dashboard. Each user selection triggers one
//! fetch-transform-render cycle per tab; the service itself holds no
//! per-session state.
//!
//! # Endpoints
//!
//! - `GET /` - embedded dashboard page
//! - `GET /api/health` - service health check
//! - `GET /api/plots` - plot list for the selector
//! - `GET /api/tabs/sensors?plot=ID` - humidity series and soil gauges
//! - `GET /api/tabs/irrigation?plot=ID` - binary status series and badge
//! - `GET /api/tabs/suggestions?plot=ID` - suggestion table and action counts
//!
//! The `plot` parameter is optional on the tab routes; without it each
//! handler returns its neutral "no selection" model without querying the
//! database.
//!
//! # Configuration
//!
//! The service reads configuration from `~/.config/agrodash/agrodash.toml`:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8050"
//!
//! [database]
//! user = "agro_reader"
//! password = "..."
//! dsn = "/var/lib/agrodash/field.db"
//! ```
//!
//! All three `[database]` keys are required; startup fails with a
//! field-by-field error report before the socket is bound.

pub mod api;
pub mod config;
pub mod state;
pub mod view;

pub use config::{Config, ConfigError, DatabaseConfig, ServerConfig};
pub use state::AppState;
