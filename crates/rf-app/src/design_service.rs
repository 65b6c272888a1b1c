//! Sizing a new installation from design rainfall and groundwater depth.

use rf_core::numeric::ensure_finite;
use rf_model::{DesignInput, SystemDesign, design_system};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Check the inputs and size the system.
///
/// The rooftop area must be positive; rainfall and groundwater depth must be
/// finite and not negative.
pub fn design(input: &DesignInput) -> AppResult<SystemDesign> {
    let area = ensure_finite(input.rooftop_area_m2, "rooftop area")?;
    if area <= 0.0 {
        return Err(AppError::InvalidInput(format!("rooftop area must be positive: {}", area)));
    }
    for (what, v) in [
        ("maximum daily rainfall", input.max_daily_rainfall_mm),
        ("maximum hourly rainfall", input.max_hourly_rainfall_mm),
        ("groundwater depth", input.groundwater_depth_m),
    ] {
        let v = ensure_finite(v, what)?;
        if v < 0.0 {
            return Err(AppError::InvalidInput(format!("{} must not be negative: {}", what, v)));
        }
    }

    let d = design_system(input);
    if !d.feasible {
        warn!(
            "Groundwater at {} m is too shallow for recharge, sizing storage only",
            input.groundwater_depth_m
        );
    }
    info!(
        "Design for {} m² {} roof: {:.2} m³ runoff, {:.3} m³/hr peak, {}",
        area,
        input.roof_type,
        d.runoff_volume_m3,
        d.peak_flow_m3_per_hr,
        d.category.description()
    );
    Ok(d)
}
