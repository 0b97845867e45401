// Dashboard state - the three independently-updated slots and their snapshot
use crate::domain::alerts::{classify_alerts, ClassifiedAlerts};
use crate::domain::chart::{chart_window, ChartPoint};
use crate::domain::metrics::{compute_metrics, PerformanceMetrics};
use crate::domain::telemetry::{Alert, Prediction, TelemetryReading};
use serde::Serialize;

/// Payload of one slot, tagged with the installation it was fetched for.
///
/// The tag lets consumers tell fresh data from data carried over across a
/// selection change (old data stays visible until the new installation's
/// first response lands).
#[derive(Debug, Clone, PartialEq)]
pub struct SlotData<T> {
    pub installation_id: String,
    pub items: Vec<T>,
}

impl<T> SlotData<T> {
    pub fn new(installation_id: &str, items: Vec<T>) -> Self {
        Self {
            installation_id: installation_id.to_string(),
            items,
        }
    }
}

/// The three slots are applied independently as responses arrive, so they
/// may reflect slightly different instants. A slow endpoint never holds the
/// other two back; this is the chosen responsiveness trade-off.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub telemetry: Option<SlotData<TelemetryReading>>,
    pub predictions: Option<SlotData<Prediction>>,
    pub alerts: Option<SlotData<Alert>>,
}

impl DashboardState {
    /// Derives the display-ready read model from whatever the slots
    /// currently hold. Empty slots produce well-defined empty output.
    pub fn snapshot(&self, selected_installation: Option<&str>, loading: bool) -> DashboardSnapshot {
        let readings: &[TelemetryReading] = self
            .telemetry
            .as_ref()
            .map(|slot| slot.items.as_slice())
            .unwrap_or_default();
        let predictions: &[Prediction] = self
            .predictions
            .as_ref()
            .map(|slot| slot.items.as_slice())
            .unwrap_or_default();
        let alerts: &[Alert] = self
            .alerts
            .as_ref()
            .map(|slot| slot.items.as_slice())
            .unwrap_or_default();

        DashboardSnapshot {
            selected_installation: selected_installation.map(str::to_string),
            metrics: compute_metrics(readings, predictions),
            chart: chart_window(readings),
            alerts: classify_alerts(alerts),
            loading,
            telemetry_source: self.slot_source(&self.telemetry),
            predictions_source: self.slot_source(&self.predictions),
            alerts_source: self.slot_source(&self.alerts),
        }
    }

    fn slot_source<T>(&self, slot: &Option<SlotData<T>>) -> Option<String> {
        slot.as_ref().map(|s| s.installation_id.clone())
    }
}

/// Immutable read model handed to the presentation collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub selected_installation: Option<String>,
    pub metrics: PerformanceMetrics,
    pub chart: Vec<ChartPoint>,
    pub alerts: ClassifiedAlerts,
    pub loading: bool,
    pub telemetry_source: Option<String>,
    pub predictions_source: Option<String>,
    pub alerts_source: Option<String>,
}
