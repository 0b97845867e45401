// Alert classification and the global notification digest
use crate::domain::telemetry::{Alert, AlertSeverity};
use serde::Serialize;

/// Number of alerts retained in the global notification digest.
pub const DIGEST_SIZE: usize = 3;

/// Presentation class for a severity, from a closed table. Downstream
/// styling keys off these identifiers.
pub fn presentation_class(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::High => "alert-high",
        AlertSeverity::Medium => "alert-medium",
        AlertSeverity::Low => "alert-low",
    }
}

/// An alert annotated for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedAlert {
    #[serde(flatten)]
    pub alert: Alert,
    pub presentation_class: &'static str,
}

/// Display-ready alert list. Ordering is exactly the backend's.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassifiedAlerts {
    pub alerts: Vec<ClassifiedAlert>,
    pub count: usize,
}

/// Annotates each alert with its presentation class. Length and ordering of
/// the input are preserved; no filtering or re-sorting happens here.
pub fn classify_alerts(alerts: &[Alert]) -> ClassifiedAlerts {
    let classified: Vec<ClassifiedAlert> = alerts
        .iter()
        .map(|alert| ClassifiedAlert {
            presentation_class: presentation_class(alert.severity),
            alert: alert.clone(),
        })
        .collect();

    ClassifiedAlerts {
        count: classified.len(),
        alerts: classified,
    }
}

/// Top-N alert summary shown globally regardless of the selected
/// installation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotificationDigest {
    pub source_installation: String,
    pub alerts: Vec<Alert>,
}

impl NotificationDigest {
    /// Retains the first [`DIGEST_SIZE`] alerts in backend order.
    pub fn from_alerts(source_installation: &str, mut alerts: Vec<Alert>) -> Self {
        alerts.truncate(DIGEST_SIZE);
        Self {
            source_installation: source_installation.to_string(),
            alerts,
        }
    }
}
