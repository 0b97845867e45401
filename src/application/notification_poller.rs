// Global notification digest loop
use crate::application::backend::SolarBackend;
use crate::application::store::NotificationStore;
use crate::domain::alerts::NotificationDigest;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Selection-agnostic poll feeding the global alert digest.
///
/// Tracks the alerts of one designated installation (not the currently
/// selected one) on its own cadence, with an immediate first firing. A
/// failed poll keeps the previous digest; the operator never sees this
/// error.
pub struct NotificationPoller {
    backend: Arc<dyn SolarBackend>,
    store: Arc<NotificationStore>,
    source_installation: String,
    interval: Duration,
}

impl NotificationPoller {
    pub fn new(
        backend: Arc<dyn SolarBackend>,
        store: Arc<NotificationStore>,
        source_installation: String,
        interval: Duration,
    ) -> Self {
        Self {
            backend,
            store,
            source_installation,
            interval,
        }
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_once().await;
                }
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        debug!("notification poller stopping");
                        break;
                    }
                }
            }
        }
    }

    /// One digest refresh. Public for direct use in tests.
    pub async fn refresh_once(&self) {
        match self.backend.alerts(&self.source_installation).await {
            Ok(alerts) => {
                self.store
                    .replace(NotificationDigest::from_alerts(&self.source_installation, alerts));
            }
            Err(error) => {
                warn!(%error, source = %self.source_installation, "notification poll failed, keeping previous digest");
            }
        }
    }
}
