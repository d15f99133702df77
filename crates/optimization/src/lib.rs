//! Range selection for concentrated-liquidity positions.
//!
//! Candidates are scored by projecting each one with the earnings estimator
//! and ranking the projections under an [`objective::ObjectiveFunction`].

/// Objectives used to rank projections.
pub mod objective;
/// Candidate range sweeps.
pub mod range_sweep;

pub use objective::{
    MaximizeBestCaseApy, MaximizeMidpointWeeklyUsd, MaximizeWorstCaseApy, ObjectiveFunction,
};
pub use range_sweep::{RangeCandidate, RangeSweep};
