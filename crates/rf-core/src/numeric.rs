use crate::RfError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RfError::NonFinite { what, value: v })
    }
}

pub fn ensure_in_range(v: Real, min: Real, max: Real, what: &'static str) -> Result<Real, RfError> {
    let v = ensure_finite(v, what)?;
    if v < min || v > max {
        return Err(RfError::OutOfRange {
            what,
            value: v,
            min,
            max,
        });
    }
    Ok(v)
}

/// NaN and infinities collapse to zero.
#[inline]
pub fn finite_or_zero(v: Real) -> Real {
    if v.is_finite() { v } else { 0.0 }
}

/// Finite and `>= 0`, otherwise zero.
#[inline]
pub fn non_negative(v: Real) -> Real {
    finite_or_zero(v).max(0.0)
}

/// Clamp into `[0, 1]`; non-finite input maps to 0.
#[inline]
pub fn clamp_fraction(v: Real) -> Real {
    finite_or_zero(v).clamp(0.0, 1.0)
}

/// Clamp into `[0, 100]`; non-finite input maps to 0.
#[inline]
pub fn clamp_percent(v: Real) -> Real {
    finite_or_zero(v).clamp(0.0, 100.0)
}

/// Saturate to the finite range: infinities become `±Real::MAX`, NaN becomes 0.
///
/// Products of huge but finite inputs overflow to infinity, and `inf - inf` or
/// `inf * 0` give NaN; this keeps such results finite and ordered.
#[inline]
pub fn saturate(v: Real) -> Real {
    if v.is_nan() { 0.0 } else { v.clamp(-Real::MAX, Real::MAX) }
}

/// [`saturate`] floored at zero, for volumes and areas.
#[inline]
pub fn saturate_non_negative(v: Real) -> Real {
    saturate(v).max(0.0)
}

/// `num / den * 100`, or 0 when the denominator is not strictly positive.
#[inline]
pub fn percent_of(num: Real, den: Real) -> Real {
    if den > 0.0 && den.is_finite() {
        finite_or_zero(num / den * 100.0)
    } else {
        0.0
    }
}
