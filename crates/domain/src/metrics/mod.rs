use serde::{Deserialize, Serialize};

pub mod fees;
pub mod volatility;

/// Volatility of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityEstimate {
    /// Standard deviation of per-observation log returns.
    pub realized: f64,
    /// `realized` scaled to one year by the observation frequency.
    pub annualized: f64,
}

impl VolatilityEstimate {
    pub const ZERO: Self = Self {
        realized: 0.0,
        annualized: 0.0,
    };
}
