//! Rooftop runoff for one rainfall period.

use rf_core::numeric::{clamp_fraction, non_negative, saturate_non_negative};
use rf_core::units::{depth_volume, in_liters, m2, mm, sqft_to_m2};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DURATION_HOURS: f64 = 1.0;

fn default_duration_hours() -> f64 {
    DEFAULT_DURATION_HOURS
}

/// One evaluation period: a rainfall depth landing on a roof.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunoffEvent {
    pub roof_area_sqft: f64,
    /// Share of rainfall that reaches the outlet (0-1)
    pub runoff_coefficient: f64,
    pub rainfall_mm: f64,
    #[serde(default = "default_duration_hours")]
    pub duration_hours: f64,
}

impl RunoffEvent {
    pub fn new(roof_area_sqft: f64, runoff_coefficient: f64, rainfall_mm: f64) -> Self {
        Self {
            roof_area_sqft,
            runoff_coefficient,
            rainfall_mm,
            duration_hours: DEFAULT_DURATION_HOURS,
        }
    }

    pub fn with_duration_hours(mut self, hours: f64) -> Self {
        self.duration_hours = hours;
        self
    }

    /// Same roof, different rainfall depth.
    pub fn with_rainfall_mm(mut self, rainfall_mm: f64) -> Self {
        self.rainfall_mm = rainfall_mm;
        self
    }

    pub fn roof_area_m2(&self) -> f64 {
        sqft_to_m2(self.roof_area_sqft)
    }

    /// Duration sanitized for use in seepage calculations.
    pub fn effective_duration_hours(&self) -> f64 {
        non_negative(self.duration_hours)
    }
}

/// Liters of runoff reaching the structures: `area_m2 × rainfall_mm × coefficient`.
///
/// Rainfall and coefficient are sanitized (negative or non-finite rainfall is
/// 0, the coefficient is clamped to `[0, 1]`). Volumes too large for `f64`
/// saturate at `f64::MAX`.
pub fn compute_incoming_liters(event: &RunoffEvent) -> f64 {
    let rainfall = depth_volume(m2(event.roof_area_m2()), mm(non_negative(event.rainfall_mm)));
    saturate_non_negative(in_liters(rainfall)) * clamp_fraction(event.runoff_coefficient)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn zero_rainfall_yields_zero_for_any_coefficient(
            area in 0.0_f64..1.0e6,
            coefficient in -2.0_f64..2.0,
        ) {
            prop_assert_eq!(compute_incoming_liters(&RunoffEvent::new(area, coefficient, 0.0)), 0.0);
            prop_assert_eq!(compute_incoming_liters(&RunoffEvent::new(0.0, coefficient, area)), 0.0);
        }
    }
}
