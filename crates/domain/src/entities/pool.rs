use serde::{Deserialize, Serialize};

/// Decimals of WETH, the default token0.
pub const DEFAULT_TOKEN0_DECIMALS: u8 = 18;
/// Decimals of USDC, the default token1.
pub const DEFAULT_TOKEN1_DECIMALS: u8 = 6;

fn default_token0_decimals() -> u8 {
    DEFAULT_TOKEN0_DECIMALS
}

fn default_token1_decimals() -> u8 {
    DEFAULT_TOKEN1_DECIMALS
}

/// Point-in-time market data for a pool, as served by the pool data endpoint.
///
/// Volatilities are fractions (0.10 means 10%). `fee_growth_7d` is the fee
/// growth per unit of raw liquidity over the last week and `fee_rate` the
/// pool fee as a fraction of volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    pub current_price: f64,
    pub volatility_24h: f64,
    pub volatility_7d: f64,
    #[serde(default)]
    pub volatility_annualized: Option<f64>,
    #[serde(default)]
    pub fee_growth_7d: f64,
    #[serde(default)]
    pub fee_rate: f64,
    #[serde(default = "default_token0_decimals")]
    pub token0_decimals: u8,
    #[serde(default = "default_token1_decimals")]
    pub token1_decimals: u8,
}

/// Fee inputs that are known to be usable for a projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeMetrics {
    pub fee_growth_7d: f64,
    pub fee_rate: f64,
}

impl PoolSnapshot {
    /// Creates a snapshot for a WETH/USDC style pool.
    pub fn new(
        current_price: f64,
        volatility_24h: f64,
        volatility_7d: f64,
        fee_growth_7d: f64,
        fee_rate: f64,
    ) -> Self {
        Self {
            current_price,
            volatility_24h,
            volatility_7d,
            volatility_annualized: None,
            fee_growth_7d,
            fee_rate,
            token0_decimals: DEFAULT_TOKEN0_DECIMALS,
            token1_decimals: DEFAULT_TOKEN1_DECIMALS,
        }
    }

    /// Overrides the token decimals.
    #[must_use]
    pub fn with_decimals(mut self, token0_decimals: u8, token1_decimals: u8) -> Self {
        self.token0_decimals = token0_decimals;
        self.token1_decimals = token1_decimals;
        self
    }

    /// Returns the fee inputs, or `None` when either is missing, zero or not finite.
    pub fn fee_metrics(&self) -> Option<FeeMetrics> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(self.fee_growth_7d) && usable(self.fee_rate) {
            Some(FeeMetrics {
                fee_growth_7d: self.fee_growth_7d,
                fee_rate: self.fee_rate,
            })
        } else {
            None
        }
    }
}
