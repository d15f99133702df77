use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Token {
    pub fn new(address: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Wrapped ether on Base.
    pub fn weth() -> Self {
        Self::new("0x4200000000000000000000000000000000000006", "WETH", 18)
    }

    /// Native USDC on Base.
    pub fn usdc() -> Self {
        Self::new("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913", "USDC", 6)
    }
}
