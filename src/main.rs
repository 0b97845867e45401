// Main entry point - Dependency injection and runtime wiring
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::application::backend::SolarBackend;
use crate::application::dashboard_poller::DashboardPoller;
use crate::application::notification_poller::NotificationPoller;
use crate::application::report_service::ReportService;
use crate::application::selector::InstallationSelector;
use crate::application::store::{DashboardStore, NotificationStore};
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_backend::HttpBackend;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_snapshot, generate_report, health_check, list_installations, notification_digest,
    select_installation,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create the backend client (infrastructure layer)
    let backend: Arc<dyn SolarBackend> = Arc::new(HttpBackend::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.timeout_secs),
    )?);

    // Load the installation registry and arm the initial selection
    let selector = Arc::new(InstallationSelector::load(backend.as_ref()).await);

    // Shared stores, each written by exactly one poller
    let dashboard = Arc::new(DashboardStore::new());
    let notifications = Arc::new(NotificationStore::new());

    // Start the polling loops (application layer)
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let dashboard_poller = DashboardPoller::new(
        backend.clone(),
        dashboard.clone(),
        selector.subscribe(),
        Duration::from_secs(config.poll.dashboard_secs),
    );
    let dashboard_handle = tokio::spawn(dashboard_poller.run(shutdown_rx.clone()));

    let notification_poller = NotificationPoller::new(
        backend.clone(),
        notifications.clone(),
        config.notifications.source_installation.clone(),
        Duration::from_secs(config.poll.notification_secs),
    );
    let notification_handle = tokio::spawn(notification_poller.run(shutdown_rx));

    // Application state for the HTTP surface
    let state = Arc::new(AppState {
        selector,
        dashboard,
        notifications,
        reports: Arc::new(ReportService::new(backend)),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/installations", get(list_installations))
        .route("/dashboard", get(dashboard_snapshot))
        .route("/dashboard/select/:installation_id", post(select_installation))
        .route("/notifications", get(notification_digest))
        .route("/report/:installation_id", get(generate_report))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve until ctrl-c, then stop both pollers
    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    info!(listen = %config.server.listen, "solar-telemetry agent started");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    let _ = tokio::join!(dashboard_handle, notification_handle);
    info!("shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(error) => tracing::error!(%error, "unable to listen for shutdown signal"),
    }
}
