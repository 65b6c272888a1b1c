//! Project validation logic.
//!
//! Values that do not parse are left to the boundary coercion (they read as
//! zero). Validation rejects values that parse but are physically wrong.

use crate::schema::{LooseNumber, Project, SiteDef};
use rf_core::RfError;
use rf_core::numeric::ensure_in_range;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Empty ID in {context}")]
    EmptyId { context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut site_ids = HashSet::new();
    for site in &project.sites {
        if site.id.trim().is_empty() {
            return Err(ValidationError::EmptyId {
                context: format!("site '{}'", site.name),
            });
        }
        if !site_ids.insert(&site.id) {
            return Err(ValidationError::DuplicateId {
                id: site.id.clone(),
                context: "sites".to_string(),
            });
        }
        validate_site(site)?;
    }

    Ok(())
}

fn validate_site(site: &SiteDef) -> Result<(), ValidationError> {
    let ctx = |field: &str| format!("site '{}' {}", site.id, field);

    loose_in_range(&ctx("rooftop.area"), &site.rooftop.area, 0.0, f64::MAX)?;
    loose_in_range(
        &ctx("rooftop.run_off_coefficient"),
        &site.rooftop.run_off_coefficient,
        0.0,
        1.0,
    )?;
    loose_in_range(&ctx("rainfall.event_mm"), &site.rainfall.event_mm, 0.0, f64::MAX)?;

    let hours = site.rainfall.duration_hours;
    if !hours.is_finite() || hours <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: ctx("rainfall.duration_hours"),
            value: hours.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }

    for (month, mm) in &site.rainfall.monthly {
        in_range(&ctx(&format!("rainfall.monthly.{}", month)), *mm, 0.0, f64::MAX)?;
    }

    loose_in_range(
        &ctx("storage.sensor_distance"),
        &site.storage.sensor_distance,
        0.0,
        f64::MAX,
    )?;
    loose_in_range(
        &ctx("storage.overflow_reading"),
        &site.storage.overflow_reading,
        0.0,
        f64::MAX,
    )?;
    loose_in_range(
        &ctx("recharge.sensor_distance"),
        &site.recharge.sensor_distance,
        0.0,
        f64::MAX,
    )?;
    loose_in_range(
        &ctx("recharge.overflow_reading"),
        &site.recharge.overflow_reading,
        0.0,
        f64::MAX,
    )?;
    loose_in_range(
        &ctx("recharge.infiltration_rate"),
        &site.recharge.infiltration_rate,
        0.0,
        f64::MAX,
    )?;
    in_range(&ctx("recharge.void_fraction"), site.recharge.void_fraction, 0.0, 1.0)?;

    if let Some(surface) = &site.surface
        && !surface.slope_deg.is_finite()
    {
        return Err(ValidationError::InvalidValue {
            field: ctx("surface.slope_deg"),
            value: surface.slope_deg.to_string(),
            reason: "must be finite".to_string(),
        });
    }

    Ok(())
}

/// Only numeric values are range-checked.
fn loose_in_range(field: &str, value: &LooseNumber, min: f64, max: f64) -> Result<(), ValidationError> {
    if value.is_numeric() {
        in_range(field, value.value(), min, max)?;
    }
    Ok(())
}

fn in_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    ensure_in_range(value, min, max, "project value")
        .map(|_| ())
        .map_err(|e| invalid(field, value, &e))
}

fn invalid(field: &str, value: f64, err: &RfError) -> ValidationError {
    let reason = match err {
        RfError::OutOfRange { min, max, .. } if *max == f64::MAX => {
            format!("must be at least {}", min)
        }
        RfError::OutOfRange { min, max, .. } => format!("must be within {}..={}", min, max),
        other => other.to_string(),
    };
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason,
    }
}
