//! Free-form `"LxWxH"` geometry strings.
//!
//! Installers type these by hand, so the parser is forgiving: case, whitespace,
//! a `×` separator and `m` unit markers are all accepted. Anything it cannot
//! make sense of becomes zero-valued geometry rather than an error.

use core::fmt;
use rf_core::numeric::non_negative;
use rf_core::units::dimensions_to_liters;
use serde::{Deserialize, Serialize};

/// Rectangular structure geometry in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const ZERO: Self = Self {
        length: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Build from raw values. Negative or non-finite components become 0.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length: non_negative(length),
            width: non_negative(width),
            height: non_negative(height),
        }
    }

    pub fn parse(input: &str) -> Self {
        parse_dimensions(input)
    }

    /// True when any component is zero, i.e. the structure holds nothing.
    pub fn is_degenerate(&self) -> bool {
        self.length == 0.0 || self.width == 0.0 || self.height == 0.0
    }

    /// Plan (floor) area in m².
    pub fn base_area_m2(&self) -> f64 {
        self.length * self.width
    }

    /// Area of the four side walls in m².
    pub fn wall_area_m2(&self) -> f64 {
        2.0 * self.height * (self.length + self.width)
    }

    pub fn gross_liters(&self) -> f64 {
        dimensions_to_liters(self.length, self.width, self.height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.length, self.width, self.height)
    }
}

impl From<&str> for Dimensions {
    fn from(value: &str) -> Self {
        parse_dimensions(value)
    }
}

/// Parse a dimension string such as `"2x2x1.5"`, `"2 m × 2 m × 1.5 m"` or `"2X2X1.5M"`.
///
/// Returns [`Dimensions::ZERO`] unless there are exactly three numeric parts.
/// A part that parses to a non-finite number (`inf`, `nan`, overflow) is zeroed
/// on its own; negative parts are zeroed too.
pub fn parse_dimensions(input: &str) -> Dimensions {
    let clean: String = input
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != 'm')
        .map(|c| if c == '×' { 'x' } else { c })
        .collect();

    let parts: Vec<&str> = clean.split('x').collect();
    if parts.len() != 3 {
        return Dimensions::ZERO;
    }

    let mut values = [0.0_f64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        match part.parse::<f64>() {
            Ok(v) => *slot = v,
            Err(_) => return Dimensions::ZERO,
        }
    }

    let [length, width, height] = values;
    Dimensions::new(length, width, height)
}
