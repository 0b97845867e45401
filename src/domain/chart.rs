// Chart-ready projection of the telemetry window
use crate::domain::telemetry::TelemetryReading;
use serde::Serialize;

/// Number of most-recent readings included in the chart window.
pub const CHART_WINDOW: usize = 20;

/// Divisor applied to irradiation before charting so it shares a visual
/// scale with power. This is a display convention, not a unit conversion;
/// `scaled_irradiation` is not a physical quantity.
pub const IRRADIATION_DISPLAY_DIVISOR: f64 = 10.0;

/// One chart sample, oldest-first within the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Time-of-day label of the reading (HH:MM:SS).
    pub display_time: String,
    pub power: f64,
    /// `irradiation_wm2 / IRRADIATION_DISPLAY_DIVISOR`, see the constant.
    pub scaled_irradiation: f64,
    pub temperature: f64,
    pub efficiency: f64,
}

/// Projects the most-recent-first reading sequence into a bounded,
/// chronologically ascending series. With fewer than [`CHART_WINDOW`]
/// readings the window simply contains everything available.
pub fn chart_window(readings: &[TelemetryReading]) -> Vec<ChartPoint> {
    readings
        .iter()
        .take(CHART_WINDOW)
        .rev()
        .map(|reading| ChartPoint {
            display_time: reading.timestamp.format("%H:%M:%S").to_string(),
            power: reading.pv_power_kw,
            scaled_irradiation: reading.irradiation_wm2 / IRRADIATION_DISPLAY_DIVISOR,
            temperature: reading.module_temp_c,
            efficiency: reading.inverter_efficiency,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // Readings indexed most-recent-first, one minute apart.
    fn readings(count: usize) -> Vec<TelemetryReading> {
        (0..count)
            .map(|i| TelemetryReading {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                    .unwrap()
                    .and_hms_opt(10, 59, 0)
                    .unwrap()
                    - chrono::Duration::minutes(i as i64),
                pv_power_kw: i as f64,
                irradiation_wm2: 100.0 * i as f64,
                module_temp_c: 40.0,
                ambient_temp_c: 30.0,
                wind_speed_ms: 0.0,
                humidity_percent: 0.0,
                dust_level: 0.0,
                inverter_efficiency: 95.0,
            })
            .collect()
    }

    #[test]
    fn window_is_bounded_and_chronological() {
        for len in [0usize, 1, 19, 20, 50] {
            let window = chart_window(&readings(len));
            assert_eq!(window.len(), len.min(CHART_WINDOW));

            // Power encodes the original index; ascending time means the
            // index must strictly decrease through the window.
            for pair in window.windows(2) {
                assert!(pair[0].power > pair[1].power);
            }
        }
    }

    #[test]
    fn irradiation_is_scaled_exactly_by_ten() {
        let input = readings(5);
        let window = chart_window(&input);

        for (point, reading) in window.iter().zip(input.iter().rev()) {
            assert_eq!(point.scaled_irradiation, reading.irradiation_wm2 / 10.0);
            assert_eq!(point.power, reading.pv_power_kw);
        }
    }

    #[test]
    fn display_time_is_time_of_day() {
        let window = chart_window(&readings(1));
        assert_eq!(window[0].display_time, "10:59:00");
    }
}
