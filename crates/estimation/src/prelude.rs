//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use rangeseeker_estimation::prelude::*;
//! ```

// Configuration
pub use crate::config::{EstimatorConfig, RebalanceCostModel, TimeInRangeBracket, TimeInRangeTable};

// Errors
pub use crate::error::EstimationError;

// Position checks
pub use crate::position_check::{PositionHealth, check_position};

// Projection
pub use crate::projector::{EarningsEstimator, project_returns};

// Range tracking
pub use crate::range_tracker::{RangeTracker, TrackerSummary};

// Heuristics
pub use crate::rebalance_cost::{RebalanceCosts, estimate_rebalance_costs};
pub use crate::time_in_range::{TimeInRange, estimate_time_in_range, volatility_ratio};

// Rules
pub use crate::rules::{AgentAction, MarketObservation, RuleEvaluator, RuleOutcome};
