//! Evaluation of strategy rules against live market observations.
//!
//! Rules are evaluated in priority order (1 first). The first triggered rule
//! whose action the agent understands decides what happens; when nothing
//! triggers, the agent keeps its range rule's band.

use crate::error::EstimationError;
use rangeseeker_domain::enums::RuleAction;
use rangeseeker_domain::strategy::{RuleKind, StrategyDefinition};
use rangeseeker_domain::value_objects::price::Price;
use rangeseeker_domain::value_objects::price_range::PriceRange;
use rangeseeker_domain::value_objects::range_width::RangeWidth;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Latest values from the price and volatility feeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketObservation {
    pub price: f64,
    /// Volatility fraction over the feed's window.
    pub volatility: f64,
}

impl MarketObservation {
    pub fn new(price: f64, volatility: f64) -> Self {
        Self { price, volatility }
    }
}

/// Result of evaluating one rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    RangeWidth {
        priority: u32,
        range: RangeWidth,
        widened: bool,
        band: PriceRange,
    },
    PriceThreshold {
        priority: u32,
        triggered: bool,
        threshold_usd: Decimal,
        action: RuleAction,
        target_asset: String,
    },
    VolatilityTrigger {
        priority: u32,
        triggered: bool,
        action: RuleAction,
    },
}

impl RuleOutcome {
    pub fn priority(&self) -> u32 {
        match self {
            Self::RangeWidth { priority, .. }
            | Self::PriceThreshold { priority, .. }
            | Self::VolatilityTrigger { priority, .. } => *priority,
        }
    }

    pub fn is_triggered(&self) -> bool {
        match self {
            Self::RangeWidth { .. } => false,
            Self::PriceThreshold { triggered, .. } | Self::VolatilityTrigger { triggered, .. } => {
                *triggered
            }
        }
    }
}

/// What the agent should do after an observation.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentAction {
    /// Close the position and hold the stable asset.
    ExitToStable { target_asset: String },
    /// Keep the position but stop recentring it.
    PauseRebalancing { band: Option<PriceRange> },
    /// Keep (or move to) this band.
    Maintain { range: RangeWidth, band: PriceRange },
    /// No range rule and nothing triggered.
    Hold,
}

#[derive(Debug, Clone)]
pub struct RuleEvaluator {
    definition: StrategyDefinition,
}

impl RuleEvaluator {
    /// Creates an evaluator for a validated definition.
    pub fn new(definition: StrategyDefinition) -> Result<Self, EstimationError> {
        definition.validate()?;
        Ok(Self { definition })
    }

    pub fn definition(&self) -> &StrategyDefinition {
        &self.definition
    }

    /// Evaluates every rule, highest priority first.
    pub fn evaluate(
        &self,
        observation: &MarketObservation,
    ) -> Result<Vec<RuleOutcome>, EstimationError> {
        let price = Price::positive(observation.price)?;
        let mut outcomes = Vec::with_capacity(self.definition.rules.len());

        for rule in self.definition.rules_by_priority() {
            let outcome = match &rule.kind {
                RuleKind::RangeWidth(params) => {
                    let (range, widened) = params.effective_range(observation.volatility)?;
                    if widened {
                        debug!(
                            volatility = observation.volatility,
                            range = %range,
                            "Volatility above threshold, widening range"
                        );
                    }
                    RuleOutcome::RangeWidth {
                        priority: rule.priority,
                        range,
                        widened,
                        band: PriceRange::around(price, range),
                    }
                }
                RuleKind::PriceThreshold(params) => {
                    let triggered = params
                        .price_usd
                        .to_f64()
                        .is_some_and(|threshold| params.operator.is_crossed(price.value, threshold));
                    RuleOutcome::PriceThreshold {
                        priority: rule.priority,
                        triggered,
                        threshold_usd: params.price_usd,
                        action: params.action.clone(),
                        target_asset: params.target_asset.clone(),
                    }
                }
                RuleKind::VolatilityTrigger(params) => RuleOutcome::VolatilityTrigger {
                    priority: rule.priority,
                    triggered: observation.volatility > params.threshold,
                    action: params.action.clone(),
                },
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Reduces the evaluated rules to a single action.
    pub fn decide(&self, observation: &MarketObservation) -> Result<AgentAction, EstimationError> {
        let outcomes = self.evaluate(observation)?;

        let band = outcomes.iter().find_map(|o| match o {
            RuleOutcome::RangeWidth { range, band, .. } => Some((*range, *band)),
            _ => None,
        });

        for outcome in outcomes.iter().filter(|o| o.is_triggered()) {
            let (action, target) = match outcome {
                RuleOutcome::PriceThreshold {
                    action,
                    target_asset,
                    ..
                } => (action, Some(target_asset)),
                RuleOutcome::VolatilityTrigger { action, .. } => (action, None),
                RuleOutcome::RangeWidth { .. } => continue,
            };
            match action {
                RuleAction::ExitToStable => {
                    let target_asset = target.cloned().unwrap_or_else(|| "USDC".to_string());
                    info!(price = observation.price, %target_asset, "Exit rule triggered");
                    return Ok(AgentAction::ExitToStable { target_asset });
                }
                RuleAction::PauseRebalancing => {
                    info!(volatility = observation.volatility, "Pausing rebalancing");
                    return Ok(AgentAction::PauseRebalancing {
                        band: band.map(|(_, b)| b),
                    });
                }
                RuleAction::Other(name) => {
                    warn!(action = %name, priority = outcome.priority(), "Ignoring unsupported rule action");
                }
            }
        }

        Ok(match band {
            Some((range, band)) => AgentAction::Maintain { range, band },
            None => AgentAction::Hold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangeseeker_domain::enums::{Preset, ThresholdOperator};
    use rangeseeker_domain::strategy::{
        PriceThresholdParameters, StrategyRule, VolatilityTriggerParameters, preset_definition,
    };
    use rust_decimal_macros::dec;

    fn aggressive() -> RuleEvaluator {
        // ±2% range, pause above 6% volatility, exit below $2,850.
        RuleEvaluator::new(preset_definition(Preset::Aggressive, 3000.0, 0.05)).unwrap()
    }

    #[test]
    fn test_outcomes_in_priority_order() {
        let outcomes = aggressive().evaluate(&MarketObservation::new(3000.0, 0.02)).unwrap();
        let priorities: Vec<u32> = outcomes.iter().map(RuleOutcome::priority).collect();
        assert_eq!(priorities, vec![1, 2, 3]);
        assert!(outcomes.iter().all(|o| !o.is_triggered()));
    }

    #[test]
    fn test_maintain_when_calm() {
        let action = aggressive().decide(&MarketObservation::new(3000.0, 0.02)).unwrap();
        match action {
            AgentAction::Maintain { range, band } => {
                assert_eq!(range.fraction(), 0.02);
                assert!((band.lower_price.value - 2940.0).abs() < 1e-9);
                assert!((band.upper_price.value - 3060.0).abs() < 1e-9);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_exit_beats_pause() {
        let action = aggressive().decide(&MarketObservation::new(2800.0, 0.20)).unwrap();
        assert_eq!(
            action,
            AgentAction::ExitToStable {
                target_asset: "USDC".to_string()
            }
        );
    }

    #[test]
    fn test_pause_keeps_band() {
        let action = aggressive().decide(&MarketObservation::new(3000.0, 0.20)).unwrap();
        match action {
            AgentAction::PauseRebalancing { band: Some(band) } => {
                assert!(band.contains(Price::new(3000.0)));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let action = aggressive().decide(&MarketObservation::new(2850.0, 0.02)).unwrap();
        assert!(matches!(action, AgentAction::Maintain { .. }));
    }

    #[test]
    fn test_priority_decides_between_triggers() {
        let definition = StrategyDefinition::new(vec![
            StrategyRule::new(
                2,
                RuleKind::PriceThreshold(PriceThresholdParameters {
                    asset: "WETH".to_string(),
                    operator: ThresholdOperator::GreaterThan,
                    price_usd: dec!(4000),
                    action: RuleAction::ExitToStable,
                    target_asset: "USDC".to_string(),
                }),
            ),
            StrategyRule::new(
                1,
                RuleKind::VolatilityTrigger(VolatilityTriggerParameters {
                    threshold: 0.05,
                    window: "24h".to_string(),
                    action: RuleAction::PauseRebalancing,
                }),
            ),
        ]);
        let evaluator = RuleEvaluator::new(definition).unwrap();
        let action = evaluator.decide(&MarketObservation::new(4100.0, 0.10)).unwrap();
        assert_eq!(action, AgentAction::PauseRebalancing { band: None });
    }

    #[test]
    fn test_unknown_action_falls_through() {
        let definition = StrategyDefinition::new(vec![StrategyRule::new(
            1,
            RuleKind::VolatilityTrigger(VolatilityTriggerParameters {
                threshold: 0.05,
                window: "24h".to_string(),
                action: RuleAction::Other("NOTIFY".to_string()),
            }),
        )]);
        let evaluator = RuleEvaluator::new(definition).unwrap();
        let outcomes = evaluator.evaluate(&MarketObservation::new(3000.0, 0.10)).unwrap();
        assert!(outcomes[0].is_triggered());
        assert_eq!(
            evaluator.decide(&MarketObservation::new(3000.0, 0.10)).unwrap(),
            AgentAction::Hold
        );
    }

    #[test]
    fn test_rejects_bad_price() {
        let err = aggressive()
            .evaluate(&MarketObservation::new(0.0, 0.02))
            .unwrap_err();
        assert!(matches!(err, EstimationError::Domain(_)));
    }
}
