// Installation selection - the registry and the active id
use crate::application::backend::SolarBackend;
use crate::domain::installation::Installation;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum SelectError {
    #[error("unknown installation id: {0}")]
    UnknownInstallation(String),
}

/// Owner of the known installation set and the active selection.
///
/// The registry is fetched once at startup and immutable afterwards. The
/// active id is published through a watch channel; the Dashboard Poller
/// subscribes and re-arms an immediate cycle on every change. If the
/// registry read fails the set is empty and nothing is selected.
#[derive(Debug)]
pub struct InstallationSelector {
    installations: Vec<Installation>,
    active: watch::Sender<Option<String>>,
}

impl InstallationSelector {
    /// Loads the registry and preselects its first entry, mirroring the
    /// dashboard's default view.
    pub async fn load(backend: &dyn SolarBackend) -> Self {
        let installations = match backend.list_installations().await {
            Ok(list) => {
                info!(count = list.len(), "loaded installation registry");
                list
            }
            Err(error) => {
                warn!(%error, "installation registry unavailable, starting with an empty set");
                Vec::new()
            }
        };

        let initial = installations.first().map(|inst| inst.id.clone());
        let (active, _) = watch::channel(initial);
        Self {
            installations,
            active,
        }
    }

    pub fn installations(&self) -> &[Installation] {
        &self.installations
    }

    pub fn active(&self) -> Option<String> {
        self.active.borrow().clone()
    }

    /// Receiver side for the pollers; fires on every selection change.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.active.subscribe()
    }

    /// Switches the active installation. Ids outside the known set are
    /// rejected; previously displayed data is left in place until the new
    /// installation's first responses arrive.
    pub fn select(&self, installation_id: &str) -> Result<(), SelectError> {
        if !self.installations.iter().any(|i| i.id == installation_id) {
            return Err(SelectError::UnknownInstallation(
                installation_id.to_string(),
            ));
        }

        info!(installation_id, "switching active installation");
        self.active
            .send_replace(Some(installation_id.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::backend::{BackendError, ReportDocument};
    use crate::domain::telemetry::{Alert, Prediction, TelemetryReading};
    use async_trait::async_trait;

    struct FixedRegistry {
        result: Result<Vec<Installation>, ()>,
    }

    fn unavailable(endpoint: &str) -> BackendError {
        BackendError::Status {
            endpoint: endpoint.to_string(),
            status: 503,
        }
    }

    #[async_trait]
    impl SolarBackend for FixedRegistry {
        async fn list_installations(&self) -> Result<Vec<Installation>, BackendError> {
            self.result
                .clone()
                .map_err(|_| unavailable("/api/installations"))
        }

        async fn latest_telemetry(
            &self,
            _installation_id: &str,
        ) -> Result<Vec<TelemetryReading>, BackendError> {
            Ok(Vec::new())
        }

        async fn predictions(
            &self,
            _installation_id: &str,
        ) -> Result<Vec<Prediction>, BackendError> {
            Ok(Vec::new())
        }

        async fn alerts(&self, _installation_id: &str) -> Result<Vec<Alert>, BackendError> {
            Ok(Vec::new())
        }

        async fn report(&self, _installation_id: &str) -> Result<ReportDocument, BackendError> {
            Ok(ReportDocument {
                report: String::new(),
            })
        }
    }

    fn site(id: &str) -> Installation {
        Installation {
            id: id.to_string(),
            name: id.to_string(),
            location: "Delhi".to_string(),
            capacity_kw: 50.0,
            panel_count: 160,
            climatic_zone: "arid".to_string(),
        }
    }

    #[tokio::test]
    async fn loads_registry_and_preselects_first_entry() {
        let backend = FixedRegistry {
            result: Ok(vec![site("INST_001"), site("INST_002")]),
        };

        let selector = InstallationSelector::load(&backend).await;
        assert_eq!(selector.installations().len(), 2);
        assert_eq!(selector.active().as_deref(), Some("INST_001"));
    }

    #[tokio::test]
    async fn registry_failure_means_empty_set_and_no_selection() {
        let backend = FixedRegistry { result: Err(()) };

        let selector = InstallationSelector::load(&backend).await;
        assert!(selector.installations().is_empty());
        assert_eq!(selector.active(), None);
    }

    #[tokio::test]
    async fn selection_changes_are_published_and_validated() {
        let backend = FixedRegistry {
            result: Ok(vec![site("INST_001"), site("INST_002")]),
        };
        let selector = InstallationSelector::load(&backend).await;
        let mut subscription = selector.subscribe();

        selector.select("INST_002").unwrap();
        assert!(subscription.has_changed().unwrap());
        assert_eq!(subscription.borrow_and_update().as_deref(), Some("INST_002"));

        let err = selector.select("INST_999").unwrap_err();
        assert_eq!(err, SelectError::UnknownInstallation("INST_999".to_string()));
        assert_eq!(selector.active().as_deref(), Some("INST_002"));
    }
}
