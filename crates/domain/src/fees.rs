use serde::{Deserialize, Serialize};

/// Pips per unit of fee: Uniswap V3 expresses fees in hundredths of a basis point.
pub const PIPS_PER_UNIT: u32 = 1_000_000;

/// A Uniswap V3 fee tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTier {
    /// Fee in pips, e.g. 500 for 0.05%.
    pub pips: u32,
}

impl FeeTier {
    /// 0.05% tier, the WETH/USDC pool agents trade on Base.
    pub const LOW: Self = Self { pips: 500 };
    /// 0.3% tier.
    pub const MEDIUM: Self = Self { pips: 3_000 };
    /// 1% tier.
    pub const HIGH: Self = Self { pips: 10_000 };

    pub fn new(pips: u32) -> Self {
        Self { pips }
    }

    /// Fee charged per unit of swap volume (500 pips -> 0.0005).
    pub fn fee_rate(&self) -> f64 {
        f64::from(self.pips) / f64::from(PIPS_PER_UNIT)
    }

    /// Tick spacing Uniswap V3 assigns to the standard tiers.
    pub fn tick_spacing(&self) -> Option<i32> {
        match self.pips {
            100 => Some(1),
            500 => Some(10),
            3_000 => Some(60),
            10_000 => Some(200),
            _ => None,
        }
    }
}
