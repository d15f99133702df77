use crate::value_objects::price::Price;
use crate::value_objects::price_range::PriceRange;
use crate::value_objects::range_width::RangeWidth;
use tracing::warn;

/// Liquidity a USD investment buys in a symmetric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidityQuote {
    /// Liquidity in human (decimal-adjusted) units.
    pub liquidity: f64,
    /// Liquidity in raw on-chain units, comparable with pool fee growth.
    pub raw_liquidity: f64,
    /// Set when the range math produced a non-positive denominator and the
    /// liquidity was clamped to zero.
    pub degenerate: bool,
}

/// Returns `[p(1 - f), p(1 + f)]`.
pub fn range_bounds(price: Price, width: RangeWidth) -> PriceRange {
    PriceRange::around(price, width)
}

/// Value of one unit of liquidity held at `price` in the band around it.
///
/// 2 * sqrt(P) - P / sqrt(P_b) - sqrt(P_a)
///
/// This is the token1 value of the token0 leg `L * (1/sqrt(P) - 1/sqrt(P_b))`
/// plus the token1 leg `L * (sqrt(P) - sqrt(P_a))`, with `L = 1`.
pub fn liquidity_denominator(price: Price, width: RangeWidth) -> f64 {
    let range = range_bounds(price, width);
    let sqrt_p = price.sqrt();
    let sqrt_pa = range.lower_price.sqrt();
    let sqrt_pb = range.upper_price.sqrt();

    (2.0 * sqrt_p) - (price.value / sqrt_pb) - sqrt_pa
}

/// Liquidity obtained by depositing `investment_usd` at `price` into the
/// band of `width`, scaled by `10^((dec0 + dec1) / 2)` into raw units.
///
/// A non-positive denominator yields zero liquidity rather than an error.
pub fn liquidity_for_investment(
    price: Price,
    width: RangeWidth,
    investment_usd: f64,
    token0_decimals: u8,
    token1_decimals: u8,
) -> LiquidityQuote {
    let denominator = liquidity_denominator(price, width);

    if denominator.is_nan() || denominator <= 0.0 {
        warn!(
            price = price.value,
            range_fraction = width.fraction(),
            denominator,
            "Degenerate range, clamping liquidity to zero"
        );
        return LiquidityQuote {
            liquidity: 0.0,
            raw_liquidity: 0.0,
            degenerate: true,
        };
    }

    let liquidity = investment_usd / denominator;
    let exponent = (f64::from(token0_decimals) + f64::from(token1_decimals)) / 2.0;
    let adjustment = 10f64.powf(exponent);

    LiquidityQuote {
        liquidity,
        raw_liquidity: liquidity * adjustment,
        degenerate: false,
    }
}

/// Raw liquidity for `investment_usd`; zero for degenerate ranges.
pub fn liquidity_per_dollar(
    price: Price,
    width: RangeWidth,
    investment_usd: f64,
    token0_decimals: u8,
    token1_decimals: u8,
) -> f64 {
    liquidity_for_investment(price, width, investment_usd, token0_decimals, token1_decimals)
        .raw_liquidity
}

/// token0 held by liquidity `l` between two sqrt prices.
/// delta_x = L * (1/sqrt(P_a) - 1/sqrt(P_b))
pub fn amount0_delta(liquidity: f64, sqrt_price_a: f64, sqrt_price_b: f64) -> f64 {
    let (lower, upper) = if sqrt_price_a < sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    };
    if lower <= 0.0 {
        return 0.0;
    }
    liquidity * (upper - lower) / (lower * upper)
}

/// token1 held by liquidity `l` between two sqrt prices.
/// delta_y = L * (sqrt(P_b) - sqrt(P_a))
pub fn amount1_delta(liquidity: f64, sqrt_price_a: f64, sqrt_price_b: f64) -> f64 {
    liquidity * (sqrt_price_a - sqrt_price_b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(fraction: f64) -> RangeWidth {
        RangeWidth::from_fraction(fraction).unwrap()
    }

    #[test]
    fn test_amount_deltas() {
        // Liquidity 1000, sqrt price 1 -> 2
        // delta_y = 1000 * (2 - 1) = 1000
        // delta_x = 1000 * (1/1 - 1/2) = 500
        assert_eq!(amount1_delta(1000.0, 1.0, 2.0), 1000.0);
        assert_eq!(amount0_delta(1000.0, 1.0, 2.0), 500.0);
        assert_eq!(amount0_delta(1000.0, 2.0, 1.0), 500.0);
    }

    #[test]
    fn test_denominator_matches_position_value() {
        // The denominator is the USD value of L = 1 at the current price.
        let price = Price::new(3000.0);
        let w = width(0.04);
        let range = range_bounds(price, w);
        let x = amount0_delta(1.0, price.sqrt(), range.upper_price.sqrt());
        let y = amount1_delta(1.0, range.lower_price.sqrt(), price.sqrt());
        let value = x * price.value + y;
        assert!((value - liquidity_denominator(price, w)).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_bracket_price() {
        for fraction in [0.001, 0.02, 0.04, 0.08, 0.5, 0.999] {
            for p in [0.0001, 1.0, 3000.0, 65_000.0] {
                let range = range_bounds(Price::new(p), width(fraction));
                assert!(range.lower_price.value < p);
                assert!(p < range.upper_price.value);
            }
        }
    }

    #[test]
    fn test_liquidity_decreases_with_width() {
        let price = Price::new(3000.0);
        let narrow = liquidity_per_dollar(price, width(0.02), 100.0, 18, 6);
        let medium = liquidity_per_dollar(price, width(0.04), 100.0, 18, 6);
        let wide = liquidity_per_dollar(price, width(0.08), 100.0, 18, 6);
        assert!(narrow >= medium);
        assert!(medium >= wide);
        assert!(wide > 0.0);
    }

    #[test]
    fn test_raw_scaling() {
        let price = Price::new(3000.0);
        let quote = liquidity_for_investment(price, width(0.04), 100.0, 18, 6);
        assert!(!quote.degenerate);
        let expected = quote.liquidity * 1e12;
        assert!((quote.raw_liquidity - expected).abs() / expected < 1e-12);

        let denominator = liquidity_denominator(price, width(0.04));
        assert!((quote.liquidity - 100.0 / denominator).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_price_clamps_to_zero() {
        let quote = liquidity_for_investment(Price::new(0.0), width(0.04), 100.0, 18, 6);
        assert!(quote.degenerate);
        assert_eq!(quote.raw_liquidity, 0.0);
    }

    #[test]
    fn test_deterministic() {
        let price = Price::new(2875.31);
        let a = liquidity_per_dollar(price, width(0.037), 250.0, 18, 6);
        let b = liquidity_per_dollar(price, width(0.037), 250.0, 18, 6);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
