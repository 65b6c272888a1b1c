//! Installed water structures: storage tanks and recharge pits.

use crate::dimensions::Dimensions;
use rf_core::numeric::{clamp_fraction, non_negative};
use serde::{Deserialize, Serialize};

/// Fraction of a recharge pit's volume that is open pore space (gravel fill).
pub const DEFAULT_VOID_FRACTION: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    Storage,
    Recharge,
}

impl StructureKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Storage => "Storage Tank",
            Self::Recharge => "Recharge Pit",
        }
    }
}

/// Recharge-only parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RechargeParams {
    /// Open pore fraction of the pit volume (0-1)
    pub void_fraction: f64,
    /// Seepage rate through base and walls (mm/hr)
    pub infiltration_rate_mm_hr: f64,
}

impl Default for RechargeParams {
    fn default() -> Self {
        Self {
            void_fraction: DEFAULT_VOID_FRACTION,
            infiltration_rate_mm_hr: 0.0,
        }
    }
}

/// A snapshot of one structure and its latest sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub kind: StructureKind,
    pub dimensions: Dimensions,
    /// Distance from the sensor down to the water surface (m)
    pub sensor_distance_m: f64,
    /// Liters the sensor reported lost while overflowing
    #[serde(default)]
    pub overflow_reading_liters: f64,
    /// Present for recharge pits only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recharge: Option<RechargeParams>,
}

impl Structure {
    pub fn storage(dimensions: Dimensions, sensor_distance_m: f64) -> Self {
        Self {
            kind: StructureKind::Storage,
            dimensions,
            sensor_distance_m,
            overflow_reading_liters: 0.0,
            recharge: None,
        }
    }

    pub fn recharge(
        dimensions: Dimensions,
        sensor_distance_m: f64,
        void_fraction: f64,
        infiltration_rate_mm_hr: f64,
    ) -> Self {
        Self {
            kind: StructureKind::Recharge,
            dimensions,
            sensor_distance_m,
            overflow_reading_liters: 0.0,
            recharge: Some(RechargeParams {
                void_fraction,
                infiltration_rate_mm_hr,
            }),
        }
    }

    pub fn with_overflow_reading(mut self, liters: f64) -> Self {
        self.overflow_reading_liters = liters;
        self
    }

    /// Sensor distance clamped to `[0, height]`.
    pub fn clamped_sensor_distance(&self) -> f64 {
        clamp_sensor_distance(self.sensor_distance_m, self.dimensions.height)
    }

    /// Recharge parameters, sanitized. Storage tanks report no void space.
    pub fn recharge_params(&self) -> RechargeParams {
        match (self.kind, self.recharge) {
            (StructureKind::Recharge, Some(p)) => RechargeParams {
                void_fraction: clamp_fraction(p.void_fraction),
                infiltration_rate_mm_hr: non_negative(p.infiltration_rate_mm_hr),
            },
            (StructureKind::Recharge, None) => RechargeParams::default(),
            (StructureKind::Storage, _) => RechargeParams {
                void_fraction: 0.0,
                infiltration_rate_mm_hr: 0.0,
            },
        }
    }

    /// Telemetry overflow flag: the water surface has reached the sensor.
    pub fn sensor_reports_overflow(&self) -> bool {
        self.sensor_distance_m == 0.0
    }
}

pub(crate) fn clamp_sensor_distance(sensor_distance_m: f64, height_m: f64) -> f64 {
    non_negative(sensor_distance_m).min(non_negative(height_m))
}
