use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-width of a symmetric liquidity range, stored as a fraction of price.
///
/// Strategy rules carry widths as whole-number percents (`4.0` meaning ±4%),
/// while the liquidity math needs a fraction (`0.04`). Both constructors
/// converge on the fraction so the two notations can never be mixed up
/// past this type.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RangeWidth(f64);

impl RangeWidth {
    /// Builds a width from a fraction in `(0, 1)`.
    pub fn from_fraction(fraction: f64) -> Result<Self, DomainError> {
        if fraction.is_finite() && fraction > 0.0 && fraction < 1.0 {
            Ok(Self(fraction))
        } else {
            Err(DomainError::InvalidRangeWidth(fraction))
        }
    }

    /// Builds a width from a whole-number percent in `(0, 100)`.
    pub fn from_percent(percent: f64) -> Result<Self, DomainError> {
        Self::from_fraction(percent / 100.0)
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl TryFrom<f64> for RangeWidth {
    type Error = DomainError;

    fn try_from(fraction: f64) -> Result<Self, Self::Error> {
        Self::from_fraction(fraction)
    }
}

impl From<RangeWidth> for f64 {
    fn from(width: RangeWidth) -> Self {
        width.0
    }
}

impl fmt::Display for RangeWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Trim float noise such as 7.000000000000001.
        let percent = (self.percent() * 1e6).round() / 1e6;
        write!(f, "±{percent}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_and_fraction_agree() {
        let a = RangeWidth::from_percent(4.0).unwrap();
        let b = RangeWidth::from_fraction(0.04).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.fraction(), 0.04);
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        assert!(RangeWidth::from_fraction(0.0).is_err());
        assert!(RangeWidth::from_fraction(1.0).is_err());
        assert!(RangeWidth::from_fraction(-0.1).is_err());
        assert!(RangeWidth::from_fraction(f64::NAN).is_err());
        // A whole-number percent passed as a fraction is caught.
        assert_eq!(
            RangeWidth::from_fraction(4.0),
            Err(DomainError::InvalidRangeWidth(4.0))
        );
        assert!(RangeWidth::from_percent(150.0).is_err());
    }

    #[test]
    fn test_display() {
        let width = RangeWidth::from_percent(8.0).unwrap();
        assert_eq!(width.to_string(), "±8%");
    }
}
