//! Fill level and spare volume of a structure from its sensor reading.

use crate::dimensions::Dimensions;
use crate::structure::{Structure, clamp_sensor_distance};
use rf_core::numeric::{clamp_percent, percent_of, saturate_non_negative};
use rf_core::units::{depth_volume, in_liters, m, m2};
use serde::Serialize;

/// Volume accounting for one structure at one sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapacityReport {
    /// Water column height (m)
    pub usable_height_m: f64,
    pub occupied_liters: f64,
    pub gross_capacity_liters: f64,
    /// Gross minus occupied: the empty volume above the water
    pub remaining_liters: f64,
    /// Water column as a share of height (%)
    pub utilization_percent: f64,
    /// Headroom above the water as a share of height (%)
    pub efficiency_percent: f64,
}

impl CapacityReport {
    /// Spare volume usable for incoming water; never negative.
    pub fn available_liters(&self) -> f64 {
        self.remaining_liters.max(0.0)
    }
}

/// Evaluate a structure's fill level.
///
/// The sensor distance is clamped to `[0, height]`, so both percentages stay
/// within `[0, 100]` and are 0 for zero-height geometry.
pub fn evaluate_structure(dims: &Dimensions, sensor_distance_m: f64) -> CapacityReport {
    let sensor = clamp_sensor_distance(sensor_distance_m, dims.height);
    let usable_height_m = (dims.height - sensor).max(0.0);

    let base = m2(dims.base_area_m2());
    let occupied_liters = saturate_non_negative(in_liters(depth_volume(base, m(usable_height_m))));
    let gross_capacity_liters = saturate_non_negative(dims.gross_liters());
    // Measured directly so huge geometry cannot produce `inf - inf`.
    let remaining_liters = saturate_non_negative(in_liters(depth_volume(base, m(sensor))));

    CapacityReport {
        usable_height_m,
        occupied_liters,
        gross_capacity_liters,
        remaining_liters,
        utilization_percent: clamp_percent(percent_of(usable_height_m, dims.height)),
        efficiency_percent: clamp_percent(percent_of(sensor, dims.height)),
    }
}

impl Structure {
    pub fn capacity(&self) -> CapacityReport {
        evaluate_structure(&self.dimensions, self.sensor_distance_m)
    }
}
