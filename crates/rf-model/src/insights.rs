//! Dashboard summary of a tank + pit installation from its latest readings.

use crate::capacity::CapacityReport;
use crate::overflow::{SystemClassification, classify_system};
use crate::runoff::{RunoffEvent, compute_incoming_liters};
use crate::structure::Structure;
use rf_core::numeric::{non_negative, saturate_non_negative};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureInsight {
    pub capacity: CapacityReport,
    /// Water column volume (L)
    pub water_liters: f64,
    /// The sensor reads zero distance
    pub overflowing: bool,
    /// Reported loss while overflowing, else 0 (L)
    pub overflow_loss_liters: f64,
}

impl StructureInsight {
    fn from_structure(structure: &Structure) -> Self {
        let capacity = structure.capacity();
        let overflowing = structure.sensor_reports_overflow();
        Self {
            capacity,
            water_liters: capacity.occupied_liters,
            overflowing,
            overflow_loss_liters: if overflowing {
                non_negative(structure.overflow_reading_liters)
            } else {
                0.0
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsSummary {
    pub tank: StructureInsight,
    pub pit: StructureInsight,
    /// Water currently held by both structures (L)
    pub rain_harvested_liters: f64,
    /// Mean headroom of the two structures (%)
    pub system_efficiency_percent: f64,
    pub total_overflow_loss_liters: f64,
    /// Classification driven by the sensors' own overflow flags
    pub classification: SystemClassification,
}

pub fn summarize(event: &RunoffEvent, tank: &Structure, pit: &Structure) -> InsightsSummary {
    let tank = StructureInsight::from_structure(tank);
    let pit = StructureInsight::from_structure(pit);
    let classification = classify_system(tank.overflowing, pit.overflowing, compute_incoming_liters(event));

    InsightsSummary {
        rain_harvested_liters: saturate_non_negative(tank.water_liters + pit.water_liters),
        system_efficiency_percent: (tank.capacity.efficiency_percent + pit.capacity.efficiency_percent) / 2.0,
        total_overflow_loss_liters: saturate_non_negative(tank.overflow_loss_liters + pit.overflow_loss_liters),
        classification,
        tank,
        pit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::Dimensions;
    use crate::overflow::SystemStatus;

    #[test]
    fn reference_installation() {
        let tank = Structure::storage(Dimensions::parse("2x2x1.5"), 0.5);
        let pit = Structure::recharge(Dimensions::parse("2x2x2.5"), 0.5, 0.4, 25.0);
        let s = summarize(&RunoffEvent::new(1000.0, 0.8, 50.0), &tank, &pit);

        assert!((s.tank.water_liters - 4000.0).abs() < 1e-6);
        assert!((s.pit.water_liters - 8000.0).abs() < 1e-6);
        assert!((s.rain_harvested_liters - 12_000.0).abs() < 1e-6);
        // (33.33 + 20) / 2
        assert!((s.system_efficiency_percent - (50.0 / 1.5 + 20.0) / 2.0).abs() < 1e-9);
        assert_eq!(s.total_overflow_loss_liters, 0.0);
        assert_eq!(s.classification.status, SystemStatus::Safe);
    }

    #[test]
    fn sensor_flags_drive_classification_and_loss() {
        let tank = Structure::storage(Dimensions::parse("2x2x1.5"), 0.0).with_overflow_reading(120.0);
        let pit = Structure::recharge(Dimensions::parse("2x2x2.5"), 0.7, 0.4, 25.0).with_overflow_reading(55.0);
        let s = summarize(&RunoffEvent::new(1000.0, 0.8, 50.0), &tank, &pit);

        assert!(s.tank.overflowing);
        assert!(!s.pit.overflowing);
        // Pit reading is ignored because its sensor does not report overflow.
        assert_eq!(s.total_overflow_loss_liters, 120.0);
        assert_eq!(s.classification.status, SystemStatus::Redirect);
        assert_eq!(s.classification.message, "3716.12 L directed to Recharge Pit");
    }

    #[test]
    fn both_flagged_wastes_incoming() {
        let tank = Structure::storage(Dimensions::parse("2x2x1.5"), 0.0);
        let pit = Structure::recharge(Dimensions::parse("2x2x2.5"), 0.0, 0.4, 25.0);
        let s = summarize(&RunoffEvent::new(1000.0, 0.8, 10.0), &tank, &pit);
        assert_eq!(s.classification.status, SystemStatus::Overflow);
        assert!((s.classification.overflow_liters - 743.224).abs() < 1e-6);
    }
}
