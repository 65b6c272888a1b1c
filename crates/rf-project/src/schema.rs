//! Project schema definitions.
//!
//! Site records mirror the field names of the monitoring document store, where
//! numbers are sometimes held as strings. Those fields use [`LooseNumber`] and
//! are coerced, never rejected, when converted to model types.

use rf_core::numeric::finite_or_zero;
use rf_model::{DEFAULT_VOID_FRACTION, Month, RedirectionPolicy, RooftopSurface};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub sites: Vec<SiteDef>,
}

impl Project {
    pub fn site(&self, id: &str) -> Option<&SiteDef> {
        self.sites.iter().find(|s| s.id == id)
    }
}

/// A number that may arrive as a string, or not at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
    #[default]
    Null,
}

impl LooseNumber {
    /// Numeric strings are parsed; anything else reads as 0.
    pub fn value(&self) -> f64 {
        match self {
            Self::Number(v) => finite_or_zero(*v),
            Self::Text(s) => s.trim().parse::<f64>().map(finite_or_zero).unwrap_or(0.0),
            Self::Null => 0.0,
        }
    }

    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Number(v) => v.is_finite(),
            Self::Text(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
            Self::Null => false,
        }
    }
}

impl From<f64> for LooseNumber {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for LooseNumber {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SiteDef {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rooftop: RooftopDef,
    #[serde(default)]
    pub rainfall: RainfallDef,
    #[serde(default)]
    pub storage: StorageDef,
    #[serde(default)]
    pub recharge: RechargeDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<RooftopSurface>,
    #[serde(default)]
    pub policy: RedirectionPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RooftopDef {
    /// Square feet
    #[serde(default)]
    pub area: LooseNumber,
    #[serde(default)]
    pub run_off_coefficient: LooseNumber,
    /// Looked up for a coefficient when `run_off_coefficient` is not a number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roof_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RainfallDef {
    /// Design storm depth (mm)
    #[serde(default)]
    pub event_mm: LooseNumber,
    #[serde(default = "default_duration_hours")]
    pub duration_hours: f64,
    /// Recorded monthly totals (mm)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub monthly: BTreeMap<Month, f64>,
}

impl Default for RainfallDef {
    fn default() -> Self {
        Self {
            event_mm: LooseNumber::Null,
            duration_hours: default_duration_hours(),
            monthly: BTreeMap::new(),
        }
    }
}

fn default_duration_hours() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageDef {
    /// "LxWxH" in meters
    #[serde(default)]
    pub dimension: String,
    #[serde(default)]
    pub sensor_distance: LooseNumber,
    #[serde(default)]
    pub overflow_reading: LooseNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RechargeDef {
    #[serde(default)]
    pub dimension: String,
    #[serde(default)]
    pub sensor_distance: LooseNumber,
    #[serde(default)]
    pub overflow_reading: LooseNumber,
    /// Soil seepage rate (mm/hr)
    #[serde(default)]
    pub infiltration_rate: LooseNumber,
    #[serde(default = "default_void_fraction")]
    pub void_fraction: f64,
}

impl Default for RechargeDef {
    fn default() -> Self {
        Self {
            dimension: String::new(),
            sensor_distance: LooseNumber::Null,
            overflow_reading: LooseNumber::Null,
            infiltration_rate: LooseNumber::Null,
            void_fraction: default_void_fraction(),
        }
    }
}

fn default_void_fraction() -> f64 {
    DEFAULT_VOID_FRACTION
}
