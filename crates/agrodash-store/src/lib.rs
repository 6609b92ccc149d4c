//! Read-only query gateway for the AgroDash monitoring database.
//!
//! The monitoring schema (`PLOT_LOCATIONS`, `SENSOR_LOGS`,
//! `WEATHER_SUGGESTIONS`) is owned by the field-logging pipeline, not by
//! this crate. The gateway only ever opens read-only connections, one per
//! call, released on every exit path.
//!
//! # Example
//!
//! ```no_run
//! use agrodash_store::Gateway;
//!
//! let gateway = Gateway::new("/var/lib/agrodash/field.db");
//! let plots = gateway.list_plots()?;
//! for plot in plots {
//!     let series = gateway.sensor_series(plot.plot_id)?;
//!     println!("{}: {} readings", plot.plot_name, series.len());
//! }
//! # Ok::<(), agrodash_store::Error>(())
//! ```

mod error;
mod gateway;

pub use error::{Error, Result};
pub use gateway::Gateway;
