// Installation registry records and fleet-level rollups
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A physical solar power site being monitored.
///
/// The registry is loaded once at startup and is immutable for the session.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Installation {
    pub id: String,
    pub name: String,
    pub location: String,
    pub capacity_kw: f64,
    pub panel_count: u32,
    pub climatic_zone: String,
}

/// Fleet-wide key figures derived from the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetSummary {
    pub site_count: usize,
    pub total_capacity_kw: f64,
    pub total_panel_count: u32,
    pub zones: BTreeMap<String, ZoneSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ZoneSummary {
    pub site_count: usize,
    pub capacity_kw: f64,
}

/// Rolls the registry up into fleet KPIs. An empty registry yields an
/// all-zero summary.
pub fn fleet_summary(installations: &[Installation]) -> FleetSummary {
    let mut summary = FleetSummary {
        site_count: installations.len(),
        ..FleetSummary::default()
    };

    for installation in installations {
        summary.total_capacity_kw += installation.capacity_kw;
        summary.total_panel_count += installation.panel_count;

        let zone = summary
            .zones
            .entry(installation.climatic_zone.clone())
            .or_default();
        zone.site_count += 1;
        zone.capacity_kw += installation.capacity_kw;
    }

    summary
}
