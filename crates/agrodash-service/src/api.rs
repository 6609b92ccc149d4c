//! HTTP endpoints for the dashboard.
//!
//! Every tab endpoint is a single fetch-transform cycle: handlers call the
//! gateway, hand the rows to the pure view builders, and serialize the
//! result. Gateway failures surface as structured JSON errors with a 502
//! status so the page can render "data unavailable" for the affected tab
//! while the others keep working.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::error;

use agrodash_types::Plot;

use crate::state::AppState;
use crate::view::{IrrigationTab, SensorTab, SuggestionsTab};

/// Embedded dashboard page.
const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/plots", get(list_plots))
        .route("/api/tabs/sensors", get(sensor_tab))
        .route("/api/tabs/irrigation", get(irrigation_tab))
        .route("/api/tabs/suggestions", get(suggestions_tab))
}

/// Serve the embedded dashboard page.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: OffsetDateTime::now_utc(),
    })
}

/// List all plots for the selector control.
async fn list_plots(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Plot>>, AppError> {
    let plots = state.gateway.list_plots()?;
    Ok(Json(plots))
}

/// Query parameters shared by the tab endpoints.
///
/// `plot` is the current selection; absent means nothing is selected and
/// the handler must answer with the neutral model without querying.
#[derive(Debug, Deserialize)]
struct TabParams {
    plot: Option<i64>,
}

/// Sensor tab: humidity series plus soil gauges.
async fn sensor_tab(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TabParams>,
) -> Result<Json<SensorTab>, AppError> {
    let Some(plot_id) = params.plot else {
        return Ok(Json(SensorTab::empty(None)));
    };

    let rows = state.gateway.sensor_series(plot_id)?;
    Ok(Json(SensorTab::build(plot_id, &rows)))
}

/// Irrigation tab: binary status series plus the latest-status badge.
async fn irrigation_tab(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TabParams>,
) -> Result<Json<IrrigationTab>, AppError> {
    let Some(plot_id) = params.plot else {
        return Ok(Json(IrrigationTab::empty(None)));
    };

    let rows = state.gateway.sensor_series(plot_id)?;
    let latest = state.gateway.latest_irrigation_status(plot_id)?;
    Ok(Json(IrrigationTab::build(plot_id, &rows, latest)))
}

/// Suggestions tab: projected table rows plus action frequency.
async fn suggestions_tab(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TabParams>,
) -> Result<Json<SuggestionsTab>, AppError> {
    let Some(plot_id) = params.plot else {
        return Ok(Json(SuggestionsTab::empty(None)));
    };

    let rows = state.gateway.suggestions(plot_id)?;
    Ok(Json(SuggestionsTab::build(plot_id, &rows)))
}

/// API-level errors.
#[derive(Debug)]
pub enum AppError {
    /// The monitoring database could not be reached or queried.
    DataSource(agrodash_store::Error),
}

impl From<agrodash_store::Error> for AppError {
    fn from(e: agrodash_store::Error) -> Self {
        AppError::DataSource(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::DataSource(e) => {
                error!("Data source error: {}", e);
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}
