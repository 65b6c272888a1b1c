//! Sizing a new installation from rooftop, design storm and groundwater depth.
//!
//! The design storm volume is `C × daily depth × area`; the peak inflow uses
//! the rational method `Q = C × i × A` with the maximum hourly intensity.
//! Groundwater depth decides which structures are worth building.

use rf_core::numeric::{clamp_fraction, non_negative, saturate_non_negative};
use rf_core::units::mm_to_m;
use serde::Serialize;

use crate::dimensions::Dimensions;

/// Coefficient used when the roof type is not recognised.
pub const DEFAULT_ROOF_COEFFICIENT: f64 = 0.8;

/// Water table at or above this depth (m below ground) rules out recharge.
pub const SHALLOW_GROUNDWATER_M: f64 = 3.0;

/// Water table at or below this depth (m below ground) calls for a trench.
pub const DEEP_GROUNDWATER_M: f64 = 10.0;

/// Runoff coefficient for a free-text roof type.
///
/// Case, surrounding whitespace and `-`/space separators are ignored; unknown
/// types get [`DEFAULT_ROOF_COEFFICIENT`].
pub fn roof_runoff_coefficient(roof_type: &str) -> f64 {
    let key = roof_type.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    match key.as_str() {
        "concrete" | "rcc" | "reinforced_concrete" => 0.9,
        "tile" | "tiles" => 0.8,
        "metal" => 0.85,
        "corrugated" => 0.8,
        "asbestos" => 0.75,
        "paved" | "stone" => 0.7,
        "green" | "garden" => 0.5,
        "unpaved" => 0.4,
        _ => DEFAULT_ROOF_COEFFICIENT,
    }
}

/// Suggested rectangular pit, meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PitDimensions {
    pub length_m: f64,
    pub breadth_m: f64,
    pub depth_m: f64,
}

impl PitDimensions {
    pub fn to_dimensions(self) -> Dimensions {
        Dimensions::new(self.length_m, self.breadth_m, self.depth_m)
    }

    pub fn volume_m3(&self) -> f64 {
        self.length_m * self.breadth_m * self.depth_m
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Size a pit of `volume_m3` with a 2:1 plan.
///
/// Depth steps with volume: 2 m up to 10 m³, 3 m up to 50 m³, 4 m beyond.
/// Length and breadth are rounded to centimeters. `None` for a non-positive
/// or non-finite volume.
pub fn design_recharge_pit(volume_m3: f64) -> Option<PitDimensions> {
    if !volume_m3.is_finite() || volume_m3 <= 0.0 {
        return None;
    }
    let depth_m = if volume_m3 <= 10.0 {
        2.0
    } else if volume_m3 <= 50.0 {
        3.0
    } else {
        4.0
    };
    let breadth = (volume_m3 / depth_m / 2.0).sqrt();

    Some(PitDimensions {
        length_m: round2(2.0 * breadth),
        breadth_m: round2(breadth),
        depth_m,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignComponent {
    StorageTank,
    RechargePit,
    RechargeTrench,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignCategory {
    /// Shallow water table: harvest into a tank only.
    StorageOnly,
    PitAndStorage,
    /// Deep water table: a trench adds recharge area.
    PitStorageAndTrench,
}

impl DesignCategory {
    /// Category for a water table `depth_m` below ground. Non-finite or
    /// negative depths are treated as 0 (shallow).
    pub fn from_groundwater_depth(depth_m: f64) -> Self {
        let depth = non_negative(depth_m);
        if depth <= SHALLOW_GROUNDWATER_M {
            Self::StorageOnly
        } else if depth < DEEP_GROUNDWATER_M {
            Self::PitAndStorage
        } else {
            Self::PitStorageAndTrench
        }
    }

    pub fn components(self) -> &'static [DesignComponent] {
        match self {
            Self::StorageOnly => &[DesignComponent::StorageTank],
            Self::PitAndStorage => &[DesignComponent::RechargePit, DesignComponent::StorageTank],
            Self::PitStorageAndTrench => &[
                DesignComponent::RechargePit,
                DesignComponent::StorageTank,
                DesignComponent::RechargeTrench,
            ],
        }
    }

    pub fn includes_pit(self) -> bool {
        !matches!(self, Self::StorageOnly)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::StorageOnly => "Storage only (groundwater 0-3 m bgl)",
            Self::PitAndStorage => "Recharge pit + storage tank (groundwater 3-10 m bgl)",
            Self::PitStorageAndTrench => {
                "Recharge pit + storage tank + recharge trench (groundwater 10 m bgl or deeper)"
            }
        }
    }
}

/// Rational-method peak inflow in m³/hr: `C × i × A`.
pub fn peak_flow_m3_per_hr(runoff_coefficient: f64, intensity_mm_per_hr: f64, area_m2: f64) -> f64 {
    saturate_non_negative(
        clamp_fraction(runoff_coefficient) * mm_to_m(non_negative(intensity_mm_per_hr)) * non_negative(area_m2),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignInput {
    pub rooftop_area_m2: f64,
    pub roof_type: String,
    /// Wettest day of the design year (mm)
    pub max_daily_rainfall_mm: f64,
    /// Most intense hour of the design year (mm/hr)
    pub max_hourly_rainfall_mm: f64,
    /// Depth to the water table (m below ground)
    pub groundwater_depth_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemDesign {
    pub runoff_coefficient: f64,
    pub rainfall_depth_m: f64,
    pub runoff_depth_m: f64,
    pub runoff_volume_m3: f64,
    pub intensity_m_per_hr: f64,
    pub peak_flow_m3_per_hr: f64,
    pub category: DesignCategory,
    pub components: Vec<DesignComponent>,
    /// Whole design-storm runoff when a pit is built, else 0
    pub recharge_pit_volume_m3: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pit: Option<PitDimensions>,
    /// Recharge is viable: the water table is deeper than 3 m
    pub feasible: bool,
}

pub fn design_system(input: &DesignInput) -> SystemDesign {
    let runoff_coefficient = roof_runoff_coefficient(&input.roof_type);
    let area = non_negative(input.rooftop_area_m2);

    let rainfall_depth_m = mm_to_m(non_negative(input.max_daily_rainfall_mm));
    let runoff_depth_m = runoff_coefficient * rainfall_depth_m;
    let runoff_volume_m3 = saturate_non_negative(runoff_depth_m * area);

    let intensity_m_per_hr = mm_to_m(non_negative(input.max_hourly_rainfall_mm));
    let peak_flow = peak_flow_m3_per_hr(runoff_coefficient, input.max_hourly_rainfall_mm, area);

    let category = DesignCategory::from_groundwater_depth(input.groundwater_depth_m);
    let recharge_pit_volume_m3 = if category.includes_pit() {
        runoff_volume_m3
    } else {
        0.0
    };

    SystemDesign {
        runoff_coefficient,
        rainfall_depth_m,
        runoff_depth_m,
        runoff_volume_m3,
        intensity_m_per_hr,
        peak_flow_m3_per_hr: peak_flow,
        category,
        components: category.components().to_vec(),
        recharge_pit_volume_m3,
        pit: design_recharge_pit(recharge_pit_volume_m3),
        feasible: non_negative(input.groundwater_depth_m) > SHALLOW_GROUNDWATER_M,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pit_holds_its_volume(volume in 0.1_f64..5000.0) {
            let pit = design_recharge_pit(volume).unwrap();
            // Each plan side is off by at most half a centimeter.
            let slack = pit.depth_m * 0.005 * (pit.length_m + pit.breadth_m + 0.02) + 1e-9;
            prop_assert!((pit.volume_m3() - volume).abs() <= slack);
            prop_assert!((pit.length_m - 2.0 * pit.breadth_m).abs() <= 0.015 + 1e-9);
        }

        #[test]
        fn design_outputs_are_finite(
            area in 0.0_f64..1.0e6,
            daily in 0.0_f64..1000.0,
            hourly in 0.0_f64..300.0,
            depth in -5.0_f64..60.0,
        ) {
            let d = design_system(&DesignInput {
                rooftop_area_m2: area,
                roof_type: "metal".to_string(),
                max_daily_rainfall_mm: daily,
                max_hourly_rainfall_mm: hourly,
                groundwater_depth_m: depth,
            });
            prop_assert!(d.runoff_volume_m3.is_finite() && d.runoff_volume_m3 >= 0.0);
            prop_assert!(d.peak_flow_m3_per_hr.is_finite());
            prop_assert_eq!(d.feasible, d.category.includes_pit());
            prop_assert_eq!(d.pit.is_some(), d.category.includes_pit() && d.runoff_volume_m3 > 0.0);
        }
    }
}
