// Dashboard synchronization loop
use crate::application::backend::SolarBackend;
use crate::application::store::DashboardStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Periodic synchronizer for the three dashboard slots of the active
/// installation.
///
/// Fires immediately on start, then on a fixed interval, and re-arms an
/// immediate cycle whenever the selection changes. Cycles are spawned, not
/// awaited in the loop, so a slow cycle never delays the next firing;
/// overlapping cycles are resolved per slot by the selection-match rule in
/// [`run_cycle`].
pub struct DashboardPoller {
    backend: Arc<dyn SolarBackend>,
    store: Arc<DashboardStore>,
    selection: watch::Receiver<Option<String>>,
    interval: Duration,
}

impl DashboardPoller {
    pub fn new(
        backend: Arc<dyn SolarBackend>,
        store: Arc<DashboardStore>,
        selection: watch::Receiver<Option<String>>,
        interval: Duration,
    ) -> Self {
        Self {
            backend,
            store,
            selection,
            interval,
        }
    }

    /// Drives synchronization until `shutdown` flips to true or the
    /// selection channel closes.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let Self {
            backend,
            store,
            mut selection,
            interval,
        } = self;
        let mut ticker = tokio::time::interval(interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    spawn_cycle(&backend, &store, &selection);
                }
                changed = selection.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    // The selection change arms its own immediate cycle;
                    // restart the cadence from here.
                    ticker.reset();
                    spawn_cycle(&backend, &store, &selection);
                }
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        debug!("dashboard poller stopping");
                        break;
                    }
                }
            }
        }
    }
}

fn spawn_cycle(
    backend: &Arc<dyn SolarBackend>,
    store: &Arc<DashboardStore>,
    selection: &watch::Receiver<Option<String>>,
) {
    let active = selection.borrow().clone();
    let Some(installation_id) = active else {
        // Empty registry: nothing to poll until a selection exists.
        return;
    };

    tokio::spawn(run_cycle(
        backend.clone(),
        store.clone(),
        selection.clone(),
        installation_id,
    ));
}

/// One synchronization cycle for `installation_id`.
///
/// The three endpoint reads run concurrently and each commits to its own
/// slot as soon as its own response resolves; success or failure of one
/// read never couples to the others. The join point only settles the
/// loading indicator.
pub(crate) async fn run_cycle(
    backend: Arc<dyn SolarBackend>,
    store: Arc<DashboardStore>,
    selection: watch::Receiver<Option<String>>,
    installation_id: String,
) {
    debug!(%installation_id, "dashboard cycle started");
    store.begin_cycle();

    let telemetry = async {
        match backend.latest_telemetry(&installation_id).await {
            Ok(items) => commit(&selection, &installation_id, "telemetry", || {
                store.apply_telemetry(&installation_id, items);
            }),
            Err(error) => {
                warn!(%error, %installation_id, "telemetry fetch failed, retrying on the next tick");
            }
        }
    };

    let predictions = async {
        match backend.predictions(&installation_id).await {
            Ok(items) => commit(&selection, &installation_id, "predictions", || {
                store.apply_predictions(&installation_id, items);
            }),
            Err(error) => {
                warn!(%error, %installation_id, "prediction fetch failed, retrying on the next tick");
            }
        }
    };

    let alerts = async {
        match backend.alerts(&installation_id).await {
            Ok(items) => commit(&selection, &installation_id, "alerts", || {
                store.apply_alerts(&installation_id, items);
            }),
            Err(error) => {
                warn!(%error, %installation_id, "alert fetch failed, retrying on the next tick");
            }
        }
    };

    tokio::join!(telemetry, predictions, alerts);
    store.end_cycle();
    debug!(%installation_id, "dashboard cycle settled");
}

/// Commits a response only while its originating request's installation is
/// still the active one. A late response for an abandoned selection is
/// discarded so it cannot overwrite fresh data; the underlying request is
/// never hard-cancelled, only suppressed here.
fn commit(
    selection: &watch::Receiver<Option<String>>,
    installation_id: &str,
    slot: &str,
    apply: impl FnOnce(),
) {
    if selection.borrow().as_deref() == Some(installation_id) {
        apply();
    } else {
        debug!(installation_id, slot, "discarding response for a deselected installation");
    }
}
