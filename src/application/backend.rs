// Backend seam - the read-only upstream API contract
use crate::domain::installation::Installation;
use crate::domain::telemetry::{Alert, Prediction, TelemetryReading};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single endpoint read. A failure on one endpoint says
/// nothing about the others; pollers retry on their next tick.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("could not decode {endpoint} response: {detail}")]
    Decode { endpoint: String, detail: String },
}

/// Generated report payload, an object with a single text field.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportDocument {
    pub report: String,
}

/// Read-only view of the upstream monitoring API.
///
/// All sequences are delivered in backend order (telemetry and predictions
/// most-recent-first). Implementations must treat a non-2xx response as a
/// failure of that single call without reading the body.
#[async_trait]
pub trait SolarBackend: Send + Sync {
    /// Lists all known installations.
    async fn list_installations(&self) -> Result<Vec<Installation>, BackendError>;

    /// Latest telemetry readings for an installation, most-recent-first.
    async fn latest_telemetry(
        &self,
        installation_id: &str,
    ) -> Result<Vec<TelemetryReading>, BackendError>;

    /// Recent predictions for an installation, most-recent-first.
    async fn predictions(&self, installation_id: &str) -> Result<Vec<Prediction>, BackendError>;

    /// Active (unresolved) alerts for an installation.
    async fn alerts(&self, installation_id: &str) -> Result<Vec<Alert>, BackendError>;

    /// Requests a generated performance report.
    async fn report(&self, installation_id: &str) -> Result<ReportDocument, BackendError>;
}
