use crate::error::DomainError;
use primitive_types::U256;

/// 2^96, the fixed-point scale of `sqrtPriceX96`.
const Q96: f64 = 79_228_162_514_264_337_593_543_950_336.0;
/// 2^64, the width of one U256 limb.
const LIMB: f64 = 18_446_744_073_709_551_616.0;
const TICK_BASE: f64 = 1.0001;

/// Lowest tick a Uniswap V3 pool can reach.
pub const MIN_TICK: i32 = -887_272;
/// Highest tick a Uniswap V3 pool can reach.
pub const MAX_TICK: i32 = 887_272;

/// Returns the price corresponding to a given tick.
/// P = 1.0001 ^ tick
pub fn tick_to_price(tick: i32) -> f64 {
    TICK_BASE.powi(tick)
}

/// Returns the tick corresponding to a given price.
/// tick = log_1.0001(P)
pub fn price_to_tick(price: f64) -> Result<i32, DomainError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::InvalidPrice(price));
    }
    Ok(price.log(TICK_BASE).round() as i32)
}

/// Scale between raw token ratios and human prices: `10^(dec0 - dec1)`.
fn decimal_scale(token0_decimals: u8, token1_decimals: u8) -> f64 {
    10f64.powi(i32::from(token0_decimals) - i32::from(token1_decimals))
}

/// Human price of token0 in token1 at a tick.
pub fn tick_to_human_price(tick: i32, token0_decimals: u8, token1_decimals: u8) -> f64 {
    tick_to_price(tick) * decimal_scale(token0_decimals, token1_decimals)
}

/// Nearest tick for a human price, the inverse of [`tick_to_human_price`].
pub fn human_price_to_tick(
    price: f64,
    token0_decimals: u8,
    token1_decimals: u8,
) -> Result<i32, DomainError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::InvalidPrice(price));
    }
    price_to_tick(price / decimal_scale(token0_decimals, token1_decimals))
}

/// Lossy conversion of a U256 to f64, most significant limb first.
pub fn u256_to_f64(value: U256) -> f64 {
    value
        .0
        .iter()
        .rev()
        .fold(0.0, |acc, &limb| acc * LIMB + limb as f64)
}

/// Human price of token0 in token1 from a pool's `sqrtPriceX96`.
/// P = (sqrtPriceX96 / 2^96)^2 * 10^dec0 / 10^dec1
pub fn price_from_sqrt_price_x96(
    sqrt_price_x96: U256,
    token0_decimals: u8,
    token1_decimals: u8,
) -> f64 {
    let sqrt_price = u256_to_f64(sqrt_price_x96) / Q96;
    sqrt_price * sqrt_price * decimal_scale(token0_decimals, token1_decimals)
}
