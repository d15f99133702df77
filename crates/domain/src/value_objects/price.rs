use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Price of token0 denominated in token1 (USDC per WETH for the default pool).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Price {
    pub value: f64,
}

impl Price {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// Builds a price, rejecting zero, negative and non-finite values.
    pub fn positive(value: f64) -> Result<Self, DomainError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self { value })
        } else {
            Err(DomainError::InvalidPrice(value))
        }
    }

    pub fn sqrt(&self) -> f64 {
        self.value.sqrt()
    }

    pub fn invert(&self) -> Self {
        if self.value == 0.0 {
            return Self { value: 0.0 };
        }
        Self {
            value: 1.0 / self.value,
        }
    }
}
