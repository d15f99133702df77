//! Earnings estimation for concentrated-liquidity agents.
//!
//! This crate turns a pool snapshot and a range width into best/worst case
//! return projections, and hosts the related agent-side heuristics:
//! - Calibration tables for time-in-range and rebalance gas costs
//! - The return projector and its annualization
//! - Realized range tracking over historical prices
//! - Strategy rule evaluation and position range checks

/// Prelude module for convenient imports.
pub mod prelude;

/// Calibration configuration.
pub mod config;
/// Error types.
pub mod error;
/// Position range checks.
pub mod position_check;
/// Return projection.
pub mod projector;
/// Realized range tracking.
pub mod range_tracker;
/// Rebalance gas-cost heuristic.
pub mod rebalance_cost;
/// Strategy rule evaluation.
pub mod rules;
/// Time-in-range heuristic.
pub mod time_in_range;

pub use error::EstimationError;
