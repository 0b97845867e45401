// Derived dashboard metrics
use crate::domain::telemetry::{Prediction, TelemetryReading};
use serde::Serialize;

/// Summary metrics derived from the current reading and prediction slots.
///
/// Power figures aggregate over the full supplied sequence; environmental
/// figures come from the most recent reading only. Every field is 0 when the
/// corresponding input is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub current_power_kw: f64,
    pub avg_power_kw: f64,
    pub max_power_kw: f64,
    /// Mean prediction efficiency score, expressed as a percentage.
    pub efficiency_percent: f64,
    pub module_temp_c: f64,
    pub irradiation_wm2: f64,
    /// Dust fraction of the latest reading, expressed as a percentage.
    pub dust_percent: f64,
    pub wind_speed_ms: f64,
    pub humidity_percent: f64,
    pub inverter_efficiency: f64,
}

/// Computes dashboard metrics from the raw slots.
///
/// Total and deterministic: defined for empty and single-element input,
/// never divides by zero, and identical inputs always produce identical
/// output.
pub fn compute_metrics(
    readings: &[TelemetryReading],
    predictions: &[Prediction],
) -> PerformanceMetrics {
    let mut metrics = PerformanceMetrics::default();

    if let Some(latest) = readings.first() {
        metrics.current_power_kw = latest.pv_power_kw;
        metrics.module_temp_c = latest.module_temp_c;
        metrics.irradiation_wm2 = latest.irradiation_wm2;
        metrics.dust_percent = latest.dust_level * 100.0;
        metrics.wind_speed_ms = latest.wind_speed_ms;
        metrics.humidity_percent = latest.humidity_percent;
        metrics.inverter_efficiency = latest.inverter_efficiency;

        metrics.avg_power_kw =
            readings.iter().map(|r| r.pv_power_kw).sum::<f64>() / readings.len() as f64;
        metrics.max_power_kw = readings.iter().map(|r| r.pv_power_kw).fold(0.0, f64::max);
    }

    if !predictions.is_empty() {
        let mean_score =
            predictions.iter().map(|p| p.efficiency_score).sum::<f64>() / predictions.len() as f64;
        metrics.efficiency_percent = mean_score * 100.0;
    }

    metrics
}
