//! Recharge pit absorption: pore storage plus seepage during the event.
//!
//! A pit takes water two ways. The gravel fill holds `void_fraction` of the
//! empty volume above the current water level, and water seeps out through the
//! base and all four walls at the soil's infiltration rate for as long as the
//! event lasts. Narrow deep pits have proportionally more wall area, so the
//! wall term matters.

use crate::dimensions::Dimensions;
use crate::structure::{Structure, clamp_sensor_distance};
use rf_core::numeric::{clamp_fraction, non_negative, saturate_non_negative};
use rf_core::units::{depth_volume, in_liters, m, m2, mm};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RechargeCapacity {
    pub usable_height_m: f64,
    /// Pore volume in the water column (L)
    pub storage_liters: f64,
    /// Base plus side walls (m²)
    pub effective_area_m2: f64,
    /// Seepage over the event duration (L)
    pub infiltration_liters: f64,
    pub total_capacity_liters: f64,
}

/// Compute what a recharge pit can absorb over `duration_hours`.
///
/// Void fraction is clamped to `[0, 1]`; a negative or non-finite rate or
/// duration contributes no seepage.
pub fn compute_recharge_capacity(
    dims: &Dimensions,
    sensor_distance_m: f64,
    void_fraction: f64,
    infiltration_rate_mm_hr: f64,
    duration_hours: f64,
) -> RechargeCapacity {
    let sensor = clamp_sensor_distance(sensor_distance_m, dims.height);
    let usable_height_m = (dims.height - sensor).max(0.0);

    let column = depth_volume(m2(dims.base_area_m2()), m(usable_height_m));
    let storage_liters = saturate_non_negative(in_liters(column)) * clamp_fraction(void_fraction);

    let effective_area_m2 = saturate_non_negative(dims.base_area_m2() + dims.wall_area_m2());
    let seep_mm = saturate_non_negative(non_negative(infiltration_rate_mm_hr) * non_negative(duration_hours));
    let infiltration_liters = saturate_non_negative(in_liters(depth_volume(m2(effective_area_m2), mm(seep_mm))));

    RechargeCapacity {
        usable_height_m,
        storage_liters,
        effective_area_m2,
        infiltration_liters,
        total_capacity_liters: saturate_non_negative(storage_liters + infiltration_liters),
    }
}

impl Structure {
    /// Recharge capacity of this structure for an event of `duration_hours`.
    ///
    /// Storage tanks have no void space and no seepage, so this is zero for them.
    pub fn recharge_capacity(&self, duration_hours: f64) -> RechargeCapacity {
        let params = self.recharge_params();
        compute_recharge_capacity(
            &self.dimensions,
            self.sensor_distance_m,
            params.void_fraction,
            params.infiltration_rate_mm_hr,
            duration_hours,
        )
    }
}
