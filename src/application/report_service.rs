// On-demand report requests
use crate::application::backend::{BackendError, ReportDocument, SolarBackend};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A second trigger while one request is pending is a no-op, not a
    /// queued request.
    #[error("a report request is already in flight")]
    AlreadyInFlight,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Single-shot, user-triggered report fetch.
///
/// Failures surface to the caller and are never retried automatically.
pub struct ReportService {
    backend: Arc<dyn SolarBackend>,
    in_flight: AtomicBool,
}

impl ReportService {
    pub fn new(backend: Arc<dyn SolarBackend>) -> Self {
        Self {
            backend,
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn generate(&self, installation_id: &str) -> Result<ReportDocument, ReportError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ReportError::AlreadyInFlight);
        }

        info!(installation_id, "requesting generated report");
        let result = self.backend.report(installation_id).await;
        self.in_flight.store(false, Ordering::SeqCst);

        Ok(result?)
    }
}
