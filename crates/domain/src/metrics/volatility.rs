use crate::metrics::VolatilityEstimate;
use crate::value_objects::price_point::PricePoint;

/// Fewer observations than this produce a zero estimate.
pub const MIN_DATA_POINTS: usize = 2;
const HOURS_PER_YEAR: f64 = 24.0 * 365.0;

/// Sample standard deviation of log returns between consecutive prices.
///
/// Non-positive prices are skipped.
pub fn realized_volatility(prices: &[f64]) -> f64 {
    let positive: Vec<f64> = prices.iter().copied().filter(|p| *p > 0.0).collect();
    if positive.len() < MIN_DATA_POINTS {
        return 0.0;
    }

    let returns: Vec<f64> = positive.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    if returns.len() < 2 {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Realized and annualized volatility of a timestamped series.
///
/// Points may arrive in any order. The annualization factor is
/// `sqrt(observations_per_hour * 24 * 365)`, so irregular swap streams are
/// scaled by their own frequency.
pub fn estimate_volatility(points: &[PricePoint]) -> VolatilityEstimate {
    if points.len() < MIN_DATA_POINTS {
        return VolatilityEstimate::ZERO;
    }

    let mut ordered = points.to_vec();
    ordered.sort_by_key(|p| p.timestamp);

    let prices: Vec<f64> = ordered.iter().map(|p| p.price).collect();
    let realized = realized_volatility(&prices);

    let first = ordered[0].timestamp;
    let last = ordered[ordered.len() - 1].timestamp;
    let span_hours = (last - first) as f64 / 3600.0;
    if span_hours <= 0.0 {
        return VolatilityEstimate::ZERO;
    }

    let per_hour = ordered.len() as f64 / span_hours;
    let annualized = realized * (per_hour * HOURS_PER_YEAR).sqrt();

    VolatilityEstimate {
        realized,
        annualized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_series_has_zero_volatility() {
        assert_eq!(realized_volatility(&[100.0, 100.0, 100.0, 100.0]), 0.0);
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(realized_volatility(&[100.0]), 0.0);
        assert_eq!(realized_volatility(&[100.0, 101.0]), 0.0);
        assert_eq!(estimate_volatility(&[PricePoint::new(0, 1.0)]), VolatilityEstimate::ZERO);
    }

    #[test]
    fn test_alternating_series() {
        // Returns: ln(1.1), ln(1/1.1), ln(1.1) -> mean ln(1.1)/3
        let prices = [100.0, 110.0, 100.0, 110.0];
        let r = 1.1f64.ln();
        let mean = r / 3.0;
        let var = ((r - mean).powi(2) * 2.0 + (-r - mean).powi(2)) / 2.0;
        assert!((realized_volatility(&prices) - var.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_skips_non_positive_prices() {
        let with_gap = realized_volatility(&[100.0, 0.0, 110.0, 100.0, -5.0, 110.0]);
        let clean = realized_volatility(&[100.0, 110.0, 100.0, 110.0]);
        assert_eq!(with_gap, clean);
    }

    #[test]
    fn test_annualization_uses_frequency() {
        // Hourly points over 3 hours: 4 observations / 3h.
        let points = vec![
            PricePoint::new(3 * 3600, 110.0),
            PricePoint::new(0, 100.0),
            PricePoint::new(2 * 3600, 100.0),
            PricePoint::new(3600, 110.0),
        ];
        let estimate = estimate_volatility(&points);
        let realized = realized_volatility(&[100.0, 110.0, 100.0, 110.0]);
        assert_eq!(estimate.realized, realized);
        let factor = (4.0 / 3.0 * 24.0 * 365.0f64).sqrt();
        assert!((estimate.annualized - realized * factor).abs() < 1e-12);
    }

    #[test]
    fn test_zero_time_span() {
        let points = vec![PricePoint::new(10, 100.0), PricePoint::new(10, 110.0), PricePoint::new(10, 100.0)];
        assert_eq!(estimate_volatility(&points), VolatilityEstimate::ZERO);
    }
}
