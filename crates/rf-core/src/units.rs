// rf-core/src/units.rs

use uom::si::f64::{Area as UomArea, Length as UomLength, Volume as UomVolume};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type Volume = UomVolume;

/// Square meters per square foot, as used by the rooftop survey data.
pub const M2_PER_SQFT: f64 = 0.092_903;
pub const LITERS_PER_M3: f64 = 1000.0;
pub const MM_PER_M: f64 = 1000.0;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn liter(v: f64) -> Volume {
    use uom::si::volume::liter;
    Volume::new::<liter>(v)
}

#[inline]
pub fn in_liters(v: Volume) -> f64 {
    use uom::si::volume::liter;
    v.get::<liter>()
}

/// Square feet to square meters. Zero for non-positive or non-finite input.
pub fn sqft_to_m2(sqft: f64) -> f64 {
    if !sqft.is_finite() || sqft <= 0.0 {
        return 0.0;
    }
    sqft * M2_PER_SQFT
}

pub fn mm_to_m(mm: f64) -> f64 {
    mm / MM_PER_M
}

/// Gross volume of a rectangular structure in liters.
pub fn dimensions_to_liters(length: f64, width: f64, height: f64) -> f64 {
    length * width * height * LITERS_PER_M3
}

/// Water volume of a uniform depth spread over an area.
///
/// 1 mm over 1 m² is exactly one liter.
pub fn depth_volume(area: Area, depth: Length) -> Volume {
    area * depth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = m(2.0);
        let _d = mm(25.0);
        let _a = m2(4.0);
        let _v = liter(1000.0);
    }

    #[test]
    fn sqft_conversion_guards_bad_input() {
        assert!((sqft_to_m2(1000.0) - 92.903).abs() < 1e-9);
        assert_eq!(sqft_to_m2(0.0), 0.0);
        assert_eq!(sqft_to_m2(-10.0), 0.0);
        assert_eq!(sqft_to_m2(f64::NAN), 0.0);
        assert_eq!(sqft_to_m2(f64::INFINITY), 0.0);
    }

    #[test]
    fn mm_to_m_scales() {
        assert!((mm_to_m(25.0) - 0.025).abs() < 1e-15);
    }

    #[test]
    fn dimensions_to_liters_is_cubic_meters_times_thousand() {
        assert!((dimensions_to_liters(2.0, 2.0, 1.5) - 6000.0).abs() < 1e-9);
        assert_eq!(dimensions_to_liters(0.0, 2.0, 1.5), 0.0);
    }

    #[test]
    fn one_mm_over_one_square_meter_is_one_liter() {
        let v = depth_volume(m2(1.0), mm(1.0));
        assert!((in_liters(v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cubic_meter_is_thousand_liters() {
        let v = depth_volume(m2(1.0), m(1.0));
        assert!((in_liters(v) - 1000.0).abs() < 1e-9);
    }
}
