//! Rooftop collection efficiency from surface condition.
//!
//! Each surface property contributes a loss factor in `(0, 1]`; the product,
//! as a percentage, is the share of rain the roof actually delivers.

use crate::error::ModelError;
use core::str::FromStr;
use rf_core::numeric::{clamp_percent, finite_or_zero};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofMaterial {
    /// Reinforced cement concrete
    #[default]
    Rcc,
    Tile,
    Metal,
    Asbestos,
    /// Anything rough or unlisted
    Other,
}

impl RoofMaterial {
    pub fn score(self) -> f64 {
        match self {
            Self::Rcc => 0.95,
            Self::Tile => 0.90,
            Self::Metal => 0.85,
            Self::Asbestos => 0.75,
            Self::Other => 0.80,
        }
    }
}

impl FromStr for RoofMaterial {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rcc" | "concrete" | "rcc / concrete" => Ok(Self::Rcc),
            "tile" => Ok(Self::Tile),
            "metal" | "sheet" | "metal / sheet" => Ok(Self::Metal),
            "asbestos" => Ok(Self::Asbestos),
            "other" | "rough" | "other / rough" => Ok(Self::Other),
            _ => Err(ModelError::UnknownLabel {
                what: "roof material",
                label: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cleanliness {
    #[default]
    Clean,
    ModeratelyClean,
    Dirty,
}

impl Cleanliness {
    pub fn score(self) -> f64 {
        match self {
            Self::Clean => 0.95,
            Self::ModeratelyClean => 0.85,
            Self::Dirty => 0.70,
        }
    }
}

impl FromStr for Cleanliness {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], " ").as_str() {
            "clean" => Ok(Self::Clean),
            "moderately clean" | "moderate" => Ok(Self::ModeratelyClean),
            "dirty" => Ok(Self::Dirty),
            _ => Err(ModelError::UnknownLabel {
                what: "cleanliness level",
                label: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Drainage {
    #[default]
    Good,
    Average,
    Poor,
}

impl Drainage {
    pub fn score(self) -> f64 {
        match self {
            Self::Good => 0.95,
            Self::Average => 0.85,
            Self::Poor => 0.70,
        }
    }
}

impl FromStr for Drainage {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(Self::Good),
            "average" => Ok(Self::Average),
            "poor" => Ok(Self::Poor),
            _ => Err(ModelError::UnknownLabel {
                what: "drainage condition",
                label: s.to_string(),
            }),
        }
    }
}

/// First-flush diverter fitted at the downpipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstFlush {
    #[default]
    Available,
    NotAvailable,
}

impl FirstFlush {
    pub fn score(self) -> f64 {
        match self {
            Self::Available => 0.95,
            Self::NotAvailable => 0.80,
        }
    }
}

impl FromStr for FirstFlush {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], " ").as_str() {
            "available" | "yes" => Ok(Self::Available),
            "not available" | "unavailable" | "no" => Ok(Self::NotAvailable),
            _ => Err(ModelError::UnknownLabel {
                what: "first-flush availability",
                label: s.to_string(),
            }),
        }
    }
}

/// Slope factor. Flat roofs pond, steep roofs shed past the gutters.
pub fn slope_score(slope_deg: f64) -> f64 {
    let deg = finite_or_zero(slope_deg);
    if deg < 2.0 {
        0.80
    } else if deg <= 10.0 {
        0.95
    } else if deg <= 25.0 {
        0.90
    } else {
        0.80
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RooftopSurface {
    pub material: RoofMaterial,
    pub slope_deg: f64,
    pub cleanliness: Cleanliness,
    pub drainage: Drainage,
    pub first_flush: FirstFlush,
}

impl Default for RooftopSurface {
    fn default() -> Self {
        Self {
            material: RoofMaterial::Rcc,
            slope_deg: 5.0,
            cleanliness: Cleanliness::Clean,
            drainage: Drainage::Good,
            first_flush: FirstFlush::Available,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyLevel {
    Low,
    Moderate,
    High,
}

impl EfficiencyLevel {
    pub fn from_percent(percent: f64) -> Self {
        if percent < 60.0 {
            Self::Low
        } else if percent < 80.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EfficiencyBreakdown {
    pub material_score: f64,
    pub slope_score: f64,
    pub cleanliness_score: f64,
    pub drainage_score: f64,
    pub first_flush_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RooftopEfficiency {
    pub breakdown: EfficiencyBreakdown,
    pub efficiency_percent: f64,
    pub level: EfficiencyLevel,
}

pub fn rooftop_efficiency(surface: &RooftopSurface) -> RooftopEfficiency {
    let breakdown = EfficiencyBreakdown {
        material_score: surface.material.score(),
        slope_score: slope_score(surface.slope_deg),
        cleanliness_score: surface.cleanliness.score(),
        drainage_score: surface.drainage.score(),
        first_flush_score: surface.first_flush.score(),
    };
    let raw = breakdown.material_score
        * breakdown.slope_score
        * breakdown.cleanliness_score
        * breakdown.drainage_score
        * breakdown.first_flush_score
        * 100.0;
    let efficiency_percent = clamp_percent(raw);

    RooftopEfficiency {
        breakdown,
        efficiency_percent,
        level: EfficiencyLevel::from_percent(efficiency_percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_case_surface_is_moderate() {
        let e = rooftop_efficiency(&RooftopSurface::default());
        assert!((e.efficiency_percent - 77.378_093_75).abs() < 1e-9);
        assert_eq!(e.level, EfficiencyLevel::Moderate);
    }

    #[test]
    fn poor_surface_is_low() {
        let surface = RooftopSurface {
            material: RoofMaterial::Asbestos,
            slope_deg: 40.0,
            cleanliness: Cleanliness::Dirty,
            drainage: Drainage::Poor,
            first_flush: FirstFlush::NotAvailable,
        };
        let e = rooftop_efficiency(&surface);
        assert!(e.efficiency_percent < 60.0);
        assert_eq!(e.level, EfficiencyLevel::Low);
    }

    #[test]
    fn slope_bands() {
        assert_eq!(slope_score(0.0), 0.80);
        assert_eq!(slope_score(2.0), 0.95);
        assert_eq!(slope_score(10.0), 0.95);
        assert_eq!(slope_score(10.5), 0.90);
        assert_eq!(slope_score(25.0), 0.90);
        assert_eq!(slope_score(30.0), 0.80);
        assert_eq!(slope_score(f64::NAN), 0.80);
    }

    #[test]
    fn level_bands() {
        assert_eq!(EfficiencyLevel::from_percent(59.9), EfficiencyLevel::Low);
        assert_eq!(EfficiencyLevel::from_percent(60.0), EfficiencyLevel::Moderate);
        assert_eq!(EfficiencyLevel::from_percent(80.0), EfficiencyLevel::High);
    }

    #[test]
    fn labels_parse() {
        assert_eq!("RCC".parse::<RoofMaterial>().unwrap(), RoofMaterial::Rcc);
        assert_eq!("Other / Rough".parse::<RoofMaterial>().unwrap(), RoofMaterial::Other);
        assert_eq!(
            "Moderately clean".parse::<Cleanliness>().unwrap(),
            Cleanliness::ModeratelyClean
        );
        assert_eq!("not_available".parse::<FirstFlush>().unwrap(), FirstFlush::NotAvailable);
        assert!("thatch".parse::<RoofMaterial>().is_err());
        assert!("muddy".parse::<Drainage>().is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn material() -> impl Strategy<Value = RoofMaterial> {
        prop_oneof![
            Just(RoofMaterial::Rcc),
            Just(RoofMaterial::Tile),
            Just(RoofMaterial::Metal),
            Just(RoofMaterial::Asbestos),
            Just(RoofMaterial::Other),
        ]
    }

    proptest! {
        #[test]
        fn efficiency_is_a_percentage(m in material(), slope in -90.0_f64..90.0) {
            let surface = RooftopSurface { material: m, slope_deg: slope, ..RooftopSurface::default() };
            let e = rooftop_efficiency(&surface);
            prop_assert!((0.0..=100.0).contains(&e.efficiency_percent));
        }
    }
}
