use crate::value_objects::price::Price;
use crate::value_objects::range_width::RangeWidth;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower_price: Price,
    pub upper_price: Price,
}

impl PriceRange {
    pub fn new(lower: Price, upper: Price) -> Self {
        Self {
            lower_price: lower,
            upper_price: upper,
        }
    }

    /// Symmetric band `[p * (1 - f), p * (1 + f)]` around `center`.
    pub fn around(center: Price, width: RangeWidth) -> Self {
        let f = width.fraction();
        Self {
            lower_price: Price::new(center.value * (1.0 - f)),
            upper_price: Price::new(center.value * (1.0 + f)),
        }
    }

    pub fn contains(&self, price: Price) -> bool {
        price.value >= self.lower_price.value && price.value <= self.upper_price.value
    }

    pub fn midpoint(&self) -> Price {
        Price::new((self.lower_price.value + self.upper_price.value) / 2.0)
    }

    /// Half-width of the band relative to its midpoint.
    pub fn width_fraction(&self) -> f64 {
        let mid = self.midpoint().value;
        if mid == 0.0 {
            return 0.0;
        }
        (self.upper_price.value - self.lower_price.value) / 2.0 / mid
    }
}
