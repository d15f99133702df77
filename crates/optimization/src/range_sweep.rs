use crate::objective::ObjectiveFunction;
use rangeseeker_domain::DomainError;
use rangeseeker_domain::entities::pool::PoolSnapshot;
use rangeseeker_domain::value_objects::earnings_estimate::EarningsEstimate;
use rangeseeker_domain::value_objects::range_width::RangeWidth;
use rangeseeker_estimation::projector::EarningsEstimator;
use serde::Serialize;
use tracing::debug;

/// Widths offered by default: ±2%, ±4% and ±8%.
pub const DEFAULT_CANDIDATE_PERCENTS: [f64; 3] = [2.0, 4.0, 8.0];

/// A candidate width with its projection and objective score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeCandidate {
    pub range: RangeWidth,
    pub estimate: EarningsEstimate,
    pub score: f64,
}

/// Projects a fixed set of widths and ranks them.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSweep {
    candidates: Vec<RangeWidth>,
}

impl Default for RangeSweep {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_CANDIDATE_PERCENTS
                .iter()
                .filter_map(|p| RangeWidth::from_percent(*p).ok())
                .collect(),
        }
    }
}

impl RangeSweep {
    pub fn new(candidates: Vec<RangeWidth>) -> Self {
        Self { candidates }
    }

    /// Builds a sweep from whole-number percents such as `[2.0, 4.0, 8.0]`.
    pub fn from_percents(percents: &[f64]) -> Result<Self, DomainError> {
        let candidates = percents
            .iter()
            .map(|p| RangeWidth::from_percent(*p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { candidates })
    }

    pub fn candidates(&self) -> &[RangeWidth] {
        &self.candidates
    }

    /// Scores every candidate, best first.
    ///
    /// Widths without an estimate are left out. Equal scores keep their
    /// input order.
    pub fn rank(
        &self,
        estimator: &EarningsEstimator,
        snapshot: &PoolSnapshot,
        objective: &dyn ObjectiveFunction,
    ) -> Vec<RangeCandidate> {
        let mut ranked: Vec<RangeCandidate> = self
            .candidates
            .iter()
            .filter_map(|&range| {
                let estimate = estimator.estimate(snapshot, range)?;
                Some(RangeCandidate {
                    range,
                    estimate,
                    score: objective.evaluate(&estimate),
                })
            })
            .collect();

        ranked.sort_by(|a, b| objective.compare(&b.estimate, &a.estimate));
        debug!(
            objective = objective.name(),
            candidates = self.candidates.len(),
            ranked = ranked.len(),
            "Ranked range candidates"
        );
        ranked
    }

    /// Highest scoring candidate, if any could be estimated.
    pub fn best(
        &self,
        estimator: &EarningsEstimator,
        snapshot: &PoolSnapshot,
        objective: &dyn ObjectiveFunction,
    ) -> Option<RangeCandidate> {
        self.rank(estimator, snapshot, objective).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::{MaximizeBestCaseApy, MaximizeMidpointWeeklyUsd};

    fn snapshot() -> PoolSnapshot {
        PoolSnapshot::new(3000.0, 0.05, 0.10, 2.0e-10, 0.0005)
    }

    #[test]
    fn test_default_candidates() {
        let percents: Vec<f64> = RangeSweep::default()
            .candidates()
            .iter()
            .map(|w| w.fraction())
            .collect();
        assert_eq!(percents, vec![0.02, 0.04, 0.08]);
    }

    #[test]
    fn test_rank_is_sorted() {
        let ranked = RangeSweep::default().rank(
            &EarningsEstimator::default(),
            &snapshot(),
            &MaximizeMidpointWeeklyUsd,
        );
        assert_eq!(ranked.len(), 3);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_missing_fees_drop_everything() {
        let mut snap = snapshot();
        snap.fee_rate = 0.0;
        let sweep = RangeSweep::default();
        let estimator = EarningsEstimator::default();
        assert!(sweep.rank(&estimator, &snap, &MaximizeBestCaseApy).is_empty());
        assert!(sweep.best(&estimator, &snap, &MaximizeBestCaseApy).is_none());
    }

    struct Flat;
    impl ObjectiveFunction for Flat {
        fn name(&self) -> &'static str {
            "flat"
        }

        fn evaluate(&self, _estimate: &EarningsEstimate) -> f64 {
            1.0
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let sweep = RangeSweep::from_percents(&[8.0, 2.0, 4.0]).unwrap();
        let ranked = sweep.rank(&EarningsEstimator::default(), &snapshot(), &Flat);
        let order: Vec<f64> = ranked.iter().map(|c| c.range.fraction()).collect();
        assert_eq!(order, vec![0.08, 0.02, 0.04]);
    }

    #[test]
    fn test_from_percents_rejects_bad_width() {
        assert!(RangeSweep::from_percents(&[4.0, 0.0]).is_err());
        assert_eq!(
            RangeSweep::from_percents(&[2.0, 8.0]).unwrap().candidates().len(),
            2
        );
    }
}
