//! Rain landing on the roof versus water that can actually be harvested.

use crate::runoff::RunoffEvent;
use rf_core::numeric::{clamp_fraction, non_negative, percent_of, saturate_non_negative};
use rf_core::units::{depth_volume, in_liters, m2, mm};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HarvestAssessment {
    /// All rain falling on the roof (L)
    pub roof_rain_liters: f64,
    /// Roof rain scaled by the runoff coefficient (L)
    pub harvest_potential_liters: f64,
    /// Harvest potential as a whole-number share of roof rain (%)
    pub capture_percent: f64,
}

pub fn assess_harvest(event: &RunoffEvent) -> HarvestAssessment {
    let roof_rain_liters = saturate_non_negative(in_liters(depth_volume(
        m2(event.roof_area_m2()),
        mm(non_negative(event.rainfall_mm)),
    )));
    let harvest_potential_liters = roof_rain_liters * clamp_fraction(event.runoff_coefficient);

    HarvestAssessment {
        roof_rain_liters,
        harvest_potential_liters,
        capture_percent: percent_of(harvest_potential_liters, roof_rain_liters).round(),
    }
}
