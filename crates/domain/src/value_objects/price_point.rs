use serde::{Deserialize, Serialize};

/// A timestamped price observation (unix seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: u64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: u64, price: f64) -> Self {
        Self { timestamp, price }
    }
}
