//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

const FRACTION_TOLERANCE: f64 = 1e-9;

/// A whole-number value between 0 and 100 inclusive.
///
/// Used for the display form of a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// Converts a 0.0-1.0 fraction by truncation, clamping out-of-range
    /// input. NaN maps to zero.
    ///
    /// A tiny tolerance keeps sums such as `0.5 + 0.2 + 0.05` from
    /// truncating one point low.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::ZERO;
        }
        let scaled = (fraction * 100.0 + FRACTION_TOLERANCE).floor().clamp(0.0, 100.0);
        Self(scaled as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_from_fraction_truncates() {
        assert_eq!(Percentage::from_fraction(0.759).value(), 75);
        assert_eq!(Percentage::from_fraction(1.0).value(), 100);
        assert_eq!(Percentage::from_fraction(0.0).value(), 0);
    }

    #[test]
    fn percentage_from_fraction_absorbs_float_error() {
        assert_eq!(Percentage::from_fraction(0.5 + 0.2 + 0.05).value(), 75);
    }

    #[test]
    fn percentage_from_fraction_clamps_and_absorbs_nan() {
        assert_eq!(Percentage::from_fraction(1.7).value(), 100);
        assert_eq!(Percentage::from_fraction(-0.2), Percentage::ZERO);
        assert_eq!(Percentage::from_fraction(f64::NAN), Percentage::ZERO);
    }

    #[test]
    fn percentage_displays_correctly() {
        assert_eq!(format!("{}", Percentage::from_fraction(0.75)), "75%");
        assert_eq!(format!("{}", Percentage::ZERO), "0%");
    }

    #[test]
    fn percentage_serializes_to_json() {
        let pct = Percentage::from_fraction(0.42);
        assert_eq!(serde_json::to_string(&pct).unwrap(), "42");
    }
}
