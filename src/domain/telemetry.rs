// Telemetry wire records as delivered by the backend
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One timestamped sensor sample for an installation.
///
/// The backend delivers readings most-recent-first. Timestamps are naive
/// UTC instants, matching the upstream `isoformat()` encoding.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TelemetryReading {
    pub timestamp: NaiveDateTime,
    pub pv_power_kw: f64,
    pub irradiation_wm2: f64,
    pub module_temp_c: f64,
    #[serde(default)]
    pub ambient_temp_c: f64,
    #[serde(default)]
    pub wind_speed_ms: f64,
    #[serde(default)]
    pub humidity_percent: f64,
    /// Dust accumulation as a fraction in 0.0–1.0.
    #[serde(default)]
    pub dust_level: f64,
    #[serde(default = "default_inverter_efficiency")]
    pub inverter_efficiency: f64,
}

// Upstream ingestion defaults inverter efficiency to 95% when the sensor
// does not report it.
fn default_inverter_efficiency() -> f64 {
    95.0
}

/// One machine-generated forecast/health record, most-recent-first.
///
/// `efficiency_score` is a fraction in 0.0–1.0, not a percentage.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Prediction {
    pub timestamp: NaiveDateTime,
    pub predicted_power_kw: f64,
    #[serde(default)]
    pub actual_power_kw: Option<f64>,
    pub efficiency_score: f64,
    pub maintenance_score: f64,
}

/// One backend-raised condition requiring operator attention.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Alert {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub message: String,
}

/// Closed severity enumeration. Any other value on the wire is a contract
/// violation and is rejected during record validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reading_parses_with_optional_fields_absent() {
        let reading: TelemetryReading = serde_json::from_value(json!({
            "timestamp": "2024-01-15T10:30:00.123456",
            "pv_power_kw": 4.2,
            "irradiation_wm2": 850.0,
            "module_temp_c": 41.5
        }))
        .unwrap();

        assert_eq!(reading.pv_power_kw, 4.2);
        assert_eq!(reading.wind_speed_ms, 0.0);
        assert_eq!(reading.dust_level, 0.0);
        assert_eq!(reading.inverter_efficiency, 95.0);
    }

    #[test]
    fn severity_is_a_closed_set() {
        let high: AlertSeverity = serde_json::from_value(json!("HIGH")).unwrap();
        assert_eq!(high, AlertSeverity::High);

        let unknown = serde_json::from_value::<AlertSeverity>(json!("CRITICAL"));
        assert!(unknown.is_err());
    }

    #[test]
    fn alert_with_unknown_severity_is_rejected() {
        let malformed = serde_json::from_value::<Alert>(json!({
            "id": 7,
            "timestamp": "2024-01-15T10:30:00",
            "alert_type": "DUST_ACCUMULATION",
            "severity": "SEVERE",
            "message": "clean the panels"
        }));
        assert!(malformed.is_err());
    }
}
