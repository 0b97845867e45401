// HTTP request handlers
use crate::application::report_service::ReportError;
use crate::domain::installation::{fleet_summary, FleetSummary, Installation};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
pub struct InstallationsResponse {
    pub installations: Vec<Installation>,
    pub fleet: FleetSummary,
}

/// The known installation registry with its fleet rollup. An empty registry
/// is a valid, empty response.
pub async fn list_installations(State(state): State<Arc<AppState>>) -> Json<InstallationsResponse> {
    let installations = state.selector.installations().to_vec();
    let fleet = fleet_summary(&installations);
    Json(InstallationsResponse {
        installations,
        fleet,
    })
}

/// Current dashboard read model for the selected installation.
pub async fn dashboard_snapshot(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let active = state.selector.active();
    Json(state.dashboard.snapshot(active.as_deref()))
}

/// Switches the active installation; polling re-arms immediately.
pub async fn select_installation(
    Path(installation_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.selector.select(&installation_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => (StatusCode::NOT_FOUND, error.to_string()).into_response(),
    }
}

/// Global notification digest, independent of the selection.
pub async fn notification_digest(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.notifications.current())
}

/// Requests a generated report. Failures surface to the caller; a request
/// while one is pending is answered with 409 and not queued.
pub async fn generate_report(
    Path(installation_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.reports.generate(&installation_id).await {
        Ok(document) => Json(document).into_response(),
        Err(ReportError::AlreadyInFlight) => (
            StatusCode::CONFLICT,
            "a report request is already in flight",
        )
            .into_response(),
        Err(error) => {
            tracing::error!(%error, %installation_id, "report generation failed");
            (
                StatusCode::BAD_GATEWAY,
                format!("report generation failed: {error}"),
            )
                .into_response()
        }
    }
}
