use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison used by a price-threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThresholdOperator {
    LessThan,
    GreaterThan,
}

impl ThresholdOperator {
    /// Returns true when `value` crosses `threshold` in this direction.
    pub fn is_crossed(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::LessThan => value < threshold,
            Self::GreaterThan => value > threshold,
        }
    }

    /// Human-readable direction used in summaries.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::LessThan => "below",
            Self::GreaterThan => "above",
        }
    }
}

/// Action an agent performs when a rule triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleAction {
    ExitToStable,
    PauseRebalancing,
    /// Any action name the agent does not interpret natively.
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExitToStable => write!(f, "EXIT_TO_STABLE"),
            Self::PauseRebalancing => write!(f, "PAUSE_REBALANCING"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Market data feeds a strategy depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedRequirement {
    PythPrice,
    ThegraphVolatility,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for FeedRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PythPrice => write!(f, "PYTH_PRICE"),
            Self::ThegraphVolatility => write!(f, "THEGRAPH_VOLATILITY"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Built-in strategy presets offered when creating an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Conservative,
    Balanced,
    Aggressive,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Self::Conservative, Self::Balanced, Self::Aggressive];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown preset '{s}' (expected conservative, balanced or aggressive)"))
    }
}
