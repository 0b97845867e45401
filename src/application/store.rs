// Shared in-memory stores, single-writer / multi-reader
use crate::domain::alerts::NotificationDigest;
use crate::domain::dashboard::{DashboardSnapshot, DashboardState, SlotData};
use crate::domain::telemetry::{Alert, Prediction, TelemetryReading};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

/// Holder of the dashboard slots and the loading indicator.
///
/// The Dashboard Poller is the only writer. Critical sections are
/// synchronous and never span an await point, so readers observe each slot
/// application atomically. The loading indicator is a count of in-flight
/// cycles rather than a flag: with overlapping cycles a finishing stale
/// cycle must not clear the indicator while a newer one is still running.
#[derive(Debug, Default)]
pub struct DashboardStore {
    state: RwLock<DashboardState>,
    in_flight_cycles: AtomicUsize,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the telemetry slot wholesale with a fresh response.
    pub fn apply_telemetry(&self, installation_id: &str, items: Vec<TelemetryReading>) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.telemetry = Some(SlotData::new(installation_id, items));
    }

    /// Replaces the prediction slot wholesale with a fresh response.
    pub fn apply_predictions(&self, installation_id: &str, items: Vec<Prediction>) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.predictions = Some(SlotData::new(installation_id, items));
    }

    /// Replaces the alert slot wholesale with a fresh response.
    pub fn apply_alerts(&self, installation_id: &str, items: Vec<Alert>) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.alerts = Some(SlotData::new(installation_id, items));
    }

    pub fn begin_cycle(&self) {
        self.in_flight_cycles.fetch_add(1, Ordering::SeqCst);
    }

    pub fn end_cycle(&self) {
        self.in_flight_cycles.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight_cycles.load(Ordering::SeqCst) > 0
    }

    /// Derives the read model for the presentation collaborator.
    pub fn snapshot(&self, selected_installation: Option<&str>) -> DashboardSnapshot {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.snapshot(selected_installation, self.is_loading())
    }

    #[cfg(test)]
    pub fn telemetry_slot(&self) -> Option<SlotData<TelemetryReading>> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.telemetry.clone()
    }

    #[cfg(test)]
    pub fn alerts_slot(&self) -> Option<SlotData<Alert>> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.alerts.clone()
    }
}

/// Holder of the global notification digest. The Notification Poller is the
/// only writer; a failed poll leaves the previous digest in place.
#[derive(Debug, Default)]
pub struct NotificationStore {
    digest: RwLock<NotificationDigest>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, digest: NotificationDigest) {
        let mut current = self.digest.write().unwrap_or_else(|e| e.into_inner());
        *current = digest;
    }

    pub fn current(&self) -> NotificationDigest {
        self.digest
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
