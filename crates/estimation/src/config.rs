//! Calibration for the earnings heuristics.
//!
//! The time-in-range brackets and gas multipliers are product calibrations,
//! not derived quantities. They live here as data so they can be tuned from
//! a JSON file without touching the projection code. Every field has a
//! default, so a file only needs to name what it overrides.

use crate::error::EstimationError;
use crate::time_in_range::TimeInRange;
use rangeseeker_domain::metrics::fees::WEEKS_PER_YEAR;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Applies when the volatility ratio is strictly above `above_ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInRangeBracket {
    pub above_ratio: f64,
    pub best_case: f64,
    pub worst_case: f64,
}

impl TimeInRangeBracket {
    pub const fn new(above_ratio: f64, best_case: f64, worst_case: f64) -> Self {
        Self {
            above_ratio,
            best_case,
            worst_case,
        }
    }
}

/// Step table from volatility ratio to expected time in range.
///
/// Brackets are checked from the highest threshold down; the first one the
/// ratio strictly exceeds wins, so a ratio sitting exactly on a threshold
/// falls into the next bracket down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeInRangeTable {
    pub brackets: Vec<TimeInRangeBracket>,
    pub default_best_case: f64,
    pub default_worst_case: f64,
}

impl Default for TimeInRangeTable {
    fn default() -> Self {
        Self {
            brackets: vec![
                TimeInRangeBracket::new(4.0, 0.70, 0.45),
                TimeInRangeBracket::new(2.5, 0.80, 0.55),
                TimeInRangeBracket::new(1.5, 0.85, 0.65),
                TimeInRangeBracket::new(0.8, 0.90, 0.75),
            ],
            default_best_case: 0.95,
            default_worst_case: 0.70,
        }
    }
}

impl TimeInRangeTable {
    pub fn lookup(&self, volatility_ratio: f64) -> TimeInRange {
        self.brackets
            .iter()
            .find(|b| volatility_ratio > b.above_ratio)
            .map(|b| TimeInRange {
                best_case: b.best_case,
                worst_case: b.worst_case,
            })
            .unwrap_or(TimeInRange {
                best_case: self.default_best_case,
                worst_case: self.default_worst_case,
            })
    }

    fn validate(&self) -> Result<(), EstimationError> {
        let is_fraction = |v: f64| (0.0..=1.0).contains(&v);

        if self.brackets.is_empty() {
            return Err(EstimationError::InvalidConfig(
                "time-in-range table needs at least one bracket".to_string(),
            ));
        }

        for pair in self.brackets.windows(2) {
            if pair[0].above_ratio.is_nan() || pair[0].above_ratio <= pair[1].above_ratio {
                return Err(EstimationError::InvalidConfig(format!(
                    "time-in-range thresholds must be strictly descending ({} then {})",
                    pair[0].above_ratio, pair[1].above_ratio
                )));
            }
        }
        for bracket in &self.brackets {
            if !bracket.above_ratio.is_finite() {
                return Err(EstimationError::InvalidConfig(format!(
                    "time-in-range threshold must be finite, got {}",
                    bracket.above_ratio
                )));
            }
            if !is_fraction(bracket.best_case) || !is_fraction(bracket.worst_case) {
                return Err(EstimationError::InvalidConfig(format!(
                    "time-in-range fractions must be within [0, 1] (bracket > {})",
                    bracket.above_ratio
                )));
            }
        }
        if !is_fraction(self.default_best_case) || !is_fraction(self.default_worst_case) {
            return Err(EstimationError::InvalidConfig(
                "default time-in-range fractions must be within [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

/// Rebalance frequency and gas cost model.
///
/// Best case: `max(floor, ratio * rate)` rebalances per week.
/// Worst case: the same shape, capped at `worst_case_cap` since a strategy
/// rebalancing more often than that gets paused by its operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebalanceCostModel {
    pub gas_per_rebalance_usd: f64,
    pub best_case_rate: f64,
    pub best_case_floor: f64,
    pub worst_case_rate: f64,
    pub worst_case_floor: f64,
    pub worst_case_cap: f64,
}

impl Default for RebalanceCostModel {
    fn default() -> Self {
        Self {
            gas_per_rebalance_usd: 3.0,
            best_case_rate: 0.25,
            best_case_floor: 0.3,
            worst_case_rate: 0.5,
            worst_case_floor: 0.5,
            worst_case_cap: 2.0,
        }
    }
}

impl RebalanceCostModel {
    /// Default model with a different gas price per rebalance.
    pub fn with_gas(gas_per_rebalance_usd: f64) -> Self {
        Self {
            gas_per_rebalance_usd,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), EstimationError> {
        let fields = [
            ("gas_per_rebalance_usd", self.gas_per_rebalance_usd),
            ("best_case_rate", self.best_case_rate),
            ("best_case_floor", self.best_case_floor),
            ("worst_case_rate", self.worst_case_rate),
            ("worst_case_floor", self.worst_case_floor),
            ("worst_case_cap", self.worst_case_cap),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(EstimationError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.worst_case_floor > self.worst_case_cap {
            return Err(EstimationError::InvalidConfig(format!(
                "worst_case_floor ({}) exceeds worst_case_cap ({})",
                self.worst_case_floor, self.worst_case_cap
            )));
        }
        Ok(())
    }
}

/// Everything the projector needs besides market data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub time_in_range: TimeInRangeTable,
    pub rebalance: RebalanceCostModel,
    /// Notional position size the projection is quoted for.
    pub investment_usd: f64,
    pub weeks_per_year: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            time_in_range: TimeInRangeTable::default(),
            rebalance: RebalanceCostModel::default(),
            investment_usd: 100.0,
            weeks_per_year: WEEKS_PER_YEAR,
        }
    }
}

impl EstimatorConfig {
    /// Parses and validates a JSON calibration.
    pub fn from_json(json: &str) -> Result<Self, EstimationError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON calibration from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EstimationError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| EstimationError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&raw).inspect_err(|err| {
            warn!(path = %path.display(), error = %err, "Rejected estimator config");
        })?;
        debug!(path = %path.display(), "Loaded estimator config");
        Ok(config)
    }

    #[must_use]
    pub fn with_investment(mut self, investment_usd: f64) -> Self {
        self.investment_usd = investment_usd;
        self
    }

    #[must_use]
    pub fn with_rebalance(mut self, rebalance: RebalanceCostModel) -> Self {
        self.rebalance = rebalance;
        self
    }

    pub fn validate(&self) -> Result<(), EstimationError> {
        self.time_in_range.validate()?;
        self.rebalance.validate()?;
        if !self.investment_usd.is_finite() || self.investment_usd <= 0.0 {
            return Err(EstimationError::InvalidConfig(format!(
                "investment_usd must be positive, got {}",
                self.investment_usd
            )));
        }
        if self.weeks_per_year == 0 {
            return Err(EstimationError::InvalidConfig(
                "weeks_per_year must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        EstimatorConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            EstimatorConfig::from_json(r#"{"rebalance": {"gas_per_rebalance_usd": 0.5}}"#).unwrap();
        assert_eq!(config.rebalance.gas_per_rebalance_usd, 0.5);
        assert_eq!(config.rebalance.worst_case_cap, 2.0);
        assert_eq!(config.time_in_range, TimeInRangeTable::default());
        assert_eq!(config.investment_usd, 100.0);
        assert_eq!(config.weeks_per_year, 52);
    }

    #[test]
    fn test_override_brackets() {
        let json = r#"{
            "time_in_range": {
                "brackets": [
                    {"above_ratio": 3.0, "best_case": 0.6, "worst_case": 0.4},
                    {"above_ratio": 1.0, "best_case": 0.8, "worst_case": 0.6}
                ],
                "default_best_case": 0.9,
                "default_worst_case": 0.8
            }
        }"#;
        let config = EstimatorConfig::from_json(json).unwrap();
        let tir = config.time_in_range.lookup(2.0);
        assert_eq!(tir.best_case, 0.8);
        assert_eq!(tir.worst_case, 0.6);
    }

    #[test]
    fn test_rejects_unsorted_brackets() {
        let json = r#"{"time_in_range": {"brackets": [
            {"above_ratio": 1.0, "best_case": 0.8, "worst_case": 0.6},
            {"above_ratio": 3.0, "best_case": 0.6, "worst_case": 0.4}
        ]}}"#;
        assert!(matches!(
            EstimatorConfig::from_json(json),
            Err(EstimationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_fraction_above_one() {
        let mut config = EstimatorConfig::default();
        config.time_in_range.default_best_case = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_floor_above_cap() {
        let config = EstimatorConfig::default().with_rebalance(RebalanceCostModel {
            worst_case_floor: 3.0,
            ..RebalanceCostModel::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_investment() {
        assert!(EstimatorConfig::default().with_investment(0.0).validate().is_err());
        assert!(EstimatorConfig::default().with_investment(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_rejects_empty_brackets() {
        let result = EstimatorConfig::from_json(r#"{"time_in_range": {"brackets": []}}"#);
        assert!(matches!(result, Err(EstimationError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            EstimatorConfig::from_json("{not json"),
            Err(EstimationError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = EstimatorConfig::from_path("/nonexistent/rangeseeker/calibration.json")
            .unwrap_err();
        assert!(matches!(err, EstimationError::ConfigIo { .. }));
    }
}
