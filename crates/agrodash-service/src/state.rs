//! Application state shared across handlers.

use std::sync::Arc;

use agrodash_store::Gateway;

/// Shared application state.
///
/// The gateway holds no open connection, so the state is immutable and
/// needs no locking: every request opens and releases its own read-only
/// connection, and concurrent selections simply race to the client, which
/// keeps whichever response matches its current selection (latest wins).
pub struct AppState {
    /// Read-only query gateway for the monitoring database.
    pub gateway: Gateway,
}

impl AppState {
    /// Create new application state.
    pub fn new(gateway: Gateway) -> Arc<Self> {
        Arc::new(Self { gateway })
    }
}
