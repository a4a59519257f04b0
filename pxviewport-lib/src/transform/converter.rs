use crate::style::unit_pattern::UnitPattern;
use std::borrow::Cow;

/// Target of one conversion: the unit to emit and the width it is relative to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target<'a> {
    pub unit: &'a str,
    pub base_width: f64,
}

/// Rewrites source-unit lengths in a value into viewport units.
#[derive(Debug, Clone)]
pub struct PixelConverter {
    pattern: UnitPattern,
    precision: u32,
    min_pixel_value: f64,
}

impl PixelConverter {
    pub fn new(pattern: UnitPattern, precision: u32, min_pixel_value: f64) -> Self {
        PixelConverter {
            pattern,
            precision,
            min_pixel_value,
        }
    }

    pub fn pattern(&self) -> &UnitPattern {
        &self.pattern
    }

    /// Convert every qualifying occurrence in `value`; everything else is
    /// copied through untouched.
    pub fn convert<'v>(&self, value: &'v str, target: Target<'_>) -> Cow<'v, str> {
        self.pattern.replace_all(value, |pixels| {
            if pixels <= self.min_pixel_value {
                return None;
            }
            let converted = to_fixed(pixels / target.base_width * 100.0, self.precision);
            if converted == 0.0 {
                Some("0".to_string())
            } else {
                Some(format!("{}{}", converted, target.unit))
            }
        })
    }
}

/// Round to `precision` decimals by truncating one digit past the precision
/// and then rounding that digit half-up. Plain `round` on the scaled value
/// picks up binary representation noise at the boundary.
pub fn to_fixed(number: f64, precision: u32) -> f64 {
    let multiplier = 10f64.powi(precision as i32 + 1);
    let whole = (number * multiplier).floor();
    ((whole / 10.0 + 0.5).floor() * 10.0) / multiplier
}
