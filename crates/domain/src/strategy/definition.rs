//! Structured strategy definitions.
//!
//! A definition is an ordered set of rules produced from a user's natural
//! language description. Lower `priority` values win when rules conflict
//! (price thresholds are 1, volatility triggers 2, range width 3).

use crate::enums::{FeedRequirement, RuleAction, ThresholdOperator};
use crate::error::DomainError;
use crate::value_objects::range_width::RangeWidth;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_rebalance_buffer() -> f64 {
    0.1
}

/// Widens the range while volatility stays above a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicWidening {
    #[serde(default)]
    pub enabled: bool,
    /// Volatility fraction above which the range widens.
    #[serde(default)]
    pub volatility_threshold: f64,
    /// Whole-number percent the range widens to.
    #[serde(default)]
    pub widen_to_percent: f64,
}

/// Parameters of a `RANGE_WIDTH` rule. Percents are whole numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeWidthParameters {
    pub base_range_percent: f64,
    #[serde(default)]
    pub dynamic_widening: Option<DynamicWidening>,
    /// Extra distance, relative to the range, tolerated before rebalancing.
    #[serde(default = "default_rebalance_buffer")]
    pub rebalance_buffer: f64,
}

impl RangeWidthParameters {
    pub fn base_range(&self) -> Result<RangeWidth, DomainError> {
        RangeWidth::from_percent(self.base_range_percent)
    }

    /// Range to use under the given volatility, and whether it was widened.
    ///
    /// Widening applies only when enabled and `volatility` is strictly above
    /// the threshold.
    pub fn effective_range(&self, volatility: f64) -> Result<(RangeWidth, bool), DomainError> {
        match &self.dynamic_widening {
            Some(widening) if widening.enabled && volatility > widening.volatility_threshold => {
                Ok((RangeWidth::from_percent(widening.widen_to_percent)?, true))
            }
            _ => Ok((self.base_range()?, false)),
        }
    }

    /// Distance from the range centre, in whole-number percent, that
    /// triggers a rebalance: `base * (1 + buffer)`.
    pub fn rebalance_threshold_percent(&self) -> f64 {
        self.base_range_percent * (1.0 + self.rebalance_buffer)
    }
}

/// Parameters of a `PRICE_THRESHOLD` rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceThresholdParameters {
    pub asset: String,
    pub operator: ThresholdOperator,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_usd: Decimal,
    pub action: RuleAction,
    pub target_asset: String,
}

/// Parameters of a `VOLATILITY_TRIGGER` rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityTriggerParameters {
    /// Volatility fraction, e.g. 0.05 for 5%.
    pub threshold: f64,
    pub window: String,
    pub action: RuleAction,
}

/// Rule body, keyed by the wire `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    RangeWidth(RangeWidthParameters),
    PriceThreshold(PriceThresholdParameters),
    VolatilityTrigger(VolatilityTriggerParameters),
}

impl RuleKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RangeWidth(_) => "RANGE_WIDTH",
            Self::PriceThreshold(_) => "PRICE_THRESHOLD",
            Self::VolatilityTrigger(_) => "VOLATILITY_TRIGGER",
        }
    }
}

/// Wire shape: `{"type": ..., "priority": ..., "parameters": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRule {
    #[serde(rename = "type")]
    pub rule_type: String,
    pub priority: u32,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRule", into = "RawRule")]
pub struct StrategyRule {
    pub priority: u32,
    pub kind: RuleKind,
}

impl StrategyRule {
    pub fn new(priority: u32, kind: RuleKind) -> Self {
        Self { priority, kind }
    }
}

impl TryFrom<RawRule> for StrategyRule {
    type Error = DomainError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        let kind = match raw.rule_type.as_str() {
            "RANGE_WIDTH" => RuleKind::RangeWidth(serde_json::from_value(raw.parameters)?),
            "PRICE_THRESHOLD" => RuleKind::PriceThreshold(serde_json::from_value(raw.parameters)?),
            "VOLATILITY_TRIGGER" => {
                RuleKind::VolatilityTrigger(serde_json::from_value(raw.parameters)?)
            }
            other => {
                return Err(DomainError::MalformedStrategy(format!(
                    "unknown rule type: {other}"
                )));
            }
        };
        Ok(Self {
            priority: raw.priority,
            kind,
        })
    }
}

impl From<StrategyRule> for RawRule {
    fn from(rule: StrategyRule) -> Self {
        let rule_type = rule.kind.type_name().to_string();
        let parameters = match &rule.kind {
            RuleKind::RangeWidth(p) => serde_json::to_value(p),
            RuleKind::PriceThreshold(p) => serde_json::to_value(p),
            RuleKind::VolatilityTrigger(p) => serde_json::to_value(p),
        }
        .unwrap_or(serde_json::Value::Null);
        Self {
            rule_type,
            priority: rule.priority,
            parameters,
        }
    }
}

/// A complete agent strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyDefinition {
    pub rules: Vec<StrategyRule>,
    #[serde(default)]
    pub feed_requirements: Vec<FeedRequirement>,
    #[serde(default)]
    pub summary: String,
}

impl StrategyDefinition {
    pub fn new(rules: Vec<StrategyRule>) -> Self {
        let feed_requirements = Self::required_feeds(&rules);
        let mut definition = Self {
            rules,
            feed_requirements,
            summary: String::new(),
        };
        definition.summary = definition.generate_summary();
        definition
    }

    /// Decodes and validates a definition from JSON.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let definition: Self = serde_json::from_str(json)?;
        definition.validate()?;
        Ok(definition)
    }

    /// Checks structural rules that decoding alone does not enforce.
    pub fn validate(&self) -> Result<(), DomainError> {
        let range_rules = self
            .rules
            .iter()
            .filter(|r| matches!(r.kind, RuleKind::RangeWidth(_)))
            .count();
        if range_rules > 1 {
            return Err(DomainError::InvalidStrategy(format!(
                "expected at most one RANGE_WIDTH rule, found {range_rules}"
            )));
        }

        for rule in &self.rules {
            match &rule.kind {
                RuleKind::RangeWidth(params) => {
                    params.base_range()?;
                    if params.rebalance_buffer.is_nan() || params.rebalance_buffer < 0.0 {
                        return Err(DomainError::InvalidStrategy(format!(
                            "rebalance buffer must be non-negative, got {}",
                            params.rebalance_buffer
                        )));
                    }
                    if let Some(widening) = params.dynamic_widening.as_ref().filter(|w| w.enabled) {
                        RangeWidth::from_percent(widening.widen_to_percent)?;
                    }
                }
                RuleKind::PriceThreshold(params) => {
                    if params.price_usd <= Decimal::ZERO {
                        return Err(DomainError::InvalidStrategy(format!(
                            "price threshold must be positive, got {}",
                            params.price_usd
                        )));
                    }
                }
                RuleKind::VolatilityTrigger(params) => {
                    if params.threshold.is_nan() || params.threshold < 0.0 {
                        return Err(DomainError::InvalidStrategy(format!(
                            "volatility threshold must be non-negative, got {}",
                            params.threshold
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// The range-width rule, if the strategy has one.
    pub fn range_rule(&self) -> Option<&RangeWidthParameters> {
        self.rules.iter().find_map(|r| match &r.kind {
            RuleKind::RangeWidth(params) => Some(params),
            _ => None,
        })
    }

    pub fn base_range(&self) -> Result<Option<RangeWidth>, DomainError> {
        self.range_rule().map(|p| p.base_range()).transpose()
    }

    /// Range in force under `volatility`, after dynamic widening.
    pub fn effective_range(&self, volatility: f64) -> Result<Option<RangeWidth>, DomainError> {
        self.range_rule()
            .map(|p| p.effective_range(volatility).map(|(width, _)| width))
            .transpose()
    }

    /// Rules ordered from highest precedence (priority 1) down. Ties keep
    /// declaration order.
    pub fn rules_by_priority(&self) -> Vec<&StrategyRule> {
        let mut ordered: Vec<&StrategyRule> = self.rules.iter().collect();
        ordered.sort_by_key(|r| r.priority);
        ordered
    }

    /// Feeds the rules depend on: price for range and price rules,
    /// volatility for widening and volatility triggers.
    pub fn required_feeds(rules: &[StrategyRule]) -> Vec<FeedRequirement> {
        let mut needs_price = false;
        let mut needs_volatility = false;
        for rule in rules {
            match &rule.kind {
                RuleKind::RangeWidth(params) => {
                    needs_price = true;
                    if params.dynamic_widening.as_ref().is_some_and(|w| w.enabled) {
                        needs_volatility = true;
                    }
                }
                RuleKind::PriceThreshold(_) => needs_price = true,
                RuleKind::VolatilityTrigger(_) => needs_volatility = true,
            }
        }

        let mut feeds = Vec::new();
        if needs_price {
            feeds.push(FeedRequirement::PythPrice);
        }
        if needs_volatility {
            feeds.push(FeedRequirement::ThegraphVolatility);
        }
        feeds
    }

    /// The stored summary, or a generated one when it is blank.
    pub fn summary_text(&self) -> String {
        if self.summary.trim().is_empty() {
            self.generate_summary()
        } else {
            self.summary.clone()
        }
    }
}
