use rangeseeker_domain::value_objects::earnings_estimate::EarningsEstimate;
use std::cmp::Ordering;

pub trait ObjectiveFunction {
    fn name(&self) -> &'static str;
    fn evaluate(&self, estimate: &EarningsEstimate) -> f64;
    fn compare(&self, a: &EarningsEstimate, b: &EarningsEstimate) -> Ordering {
        self.evaluate(a)
            .partial_cmp(&self.evaluate(b))
            .unwrap_or(Ordering::Equal)
    }
}

/// Prefers the range whose pessimistic projection is best.
pub struct MaximizeWorstCaseApy;
impl ObjectiveFunction for MaximizeWorstCaseApy {
    fn name(&self) -> &'static str {
        "worst-case APY"
    }

    fn evaluate(&self, estimate: &EarningsEstimate) -> f64 {
        estimate.worst_case.apy_percent
    }
}

pub struct MaximizeBestCaseApy;
impl ObjectiveFunction for MaximizeBestCaseApy {
    fn name(&self) -> &'static str {
        "best-case APY"
    }

    fn evaluate(&self, estimate: &EarningsEstimate) -> f64 {
        estimate.best_case.apy_percent
    }
}

pub struct MaximizeMidpointWeeklyUsd;
impl ObjectiveFunction for MaximizeMidpointWeeklyUsd {
    fn name(&self) -> &'static str {
        "midpoint weekly USD"
    }

    fn evaluate(&self, estimate: &EarningsEstimate) -> f64 {
        estimate.midpoint_weekly_usd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangeseeker_domain::value_objects::earnings_estimate::CaseResult;

    fn estimate(best_apy: f64, worst_apy: f64, best_usd: f64, worst_usd: f64) -> EarningsEstimate {
        EarningsEstimate {
            best_case: CaseResult {
                weekly_usd: best_usd,
                weekly_percent: best_usd,
                apy_percent: best_apy,
            },
            worst_case: CaseResult {
                weekly_usd: worst_usd,
                weekly_percent: worst_usd,
                apy_percent: worst_apy,
            },
        }
    }

    #[test]
    fn test_objectives_read_different_fields() {
        let tight = estimate(900.0, -50.0, 6.0, -1.0);
        let wide = estimate(300.0, 100.0, 3.0, 1.5);

        assert_eq!(MaximizeBestCaseApy.compare(&tight, &wide), Ordering::Greater);
        assert_eq!(MaximizeWorstCaseApy.compare(&tight, &wide), Ordering::Less);
        assert_eq!(MaximizeMidpointWeeklyUsd.evaluate(&tight), 2.5);
        assert_eq!(MaximizeMidpointWeeklyUsd.compare(&tight, &wide), Ordering::Greater);
    }

    #[test]
    fn test_nan_compares_equal() {
        let a = estimate(f64::NAN, 0.0, 0.0, 0.0);
        let b = estimate(10.0, 0.0, 0.0, 0.0);
        assert_eq!(MaximizeBestCaseApy.compare(&a, &b), Ordering::Equal);
    }
}
