use crate::enums::RuleAction;
use crate::strategy::definition::{RuleKind, StrategyDefinition};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Renders a number without float noise (0.05 * 100 prints as `5`).
pub(crate) fn format_number(value: f64) -> String {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(6).normalize().to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Renders a whole-dollar amount with thousands separators (`3,000`).
pub(crate) fn format_usd(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn describe_action(action: &RuleAction, target_asset: Option<&str>) -> String {
    match (action, target_asset) {
        (RuleAction::ExitToStable, Some(target)) => format!("exit to {target}"),
        _ => action.to_string().to_lowercase().replace('_', " "),
    }
}

impl StrategyDefinition {
    /// One-line description of the rules in declaration order, e.g.
    /// `Maintain ±4% range, widen to ±8% if volatility > 5%, exit to USDC if WETH below $3,000`.
    pub fn generate_summary(&self) -> String {
        let mut parts = Vec::new();
        for rule in &self.rules {
            match &rule.kind {
                RuleKind::RangeWidth(params) => {
                    parts.push(format!(
                        "Maintain ±{}% range",
                        format_number(params.base_range_percent)
                    ));
                    if let Some(widening) = params.dynamic_widening.as_ref().filter(|w| w.enabled) {
                        parts.push(format!(
                            "widen to ±{}% if volatility > {}%",
                            format_number(widening.widen_to_percent),
                            format_number(widening.volatility_threshold * 100.0)
                        ));
                    }
                }
                RuleKind::PriceThreshold(params) => {
                    parts.push(format!(
                        "{} if {} {} ${}",
                        describe_action(&params.action, Some(&params.target_asset)),
                        params.asset,
                        params.operator.describe(),
                        format_usd(params.price_usd)
                    ));
                }
                RuleKind::VolatilityTrigger(params) => {
                    parts.push(format!(
                        "{} if volatility > {}%",
                        describe_action(&params.action, None),
                        format_number(params.threshold * 100.0)
                    ));
                }
            }
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ThresholdOperator;
    use crate::strategy::definition::{
        DynamicWidening, PriceThresholdParameters, RangeWidthParameters, StrategyRule,
        VolatilityTriggerParameters,
    };
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(dec!(3000)), "3,000");
        assert_eq!(format_usd(dec!(2760.4)), "2,760");
        assert_eq!(format_usd(dec!(999.5)), "1,000");
        assert_eq!(format_usd(dec!(1234567)), "1,234,567");
        assert_eq!(format_usd(dec!(12)), "12");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.05 * 100.0), "5");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(4.0), "4");
    }

    #[test]
    fn test_summary() {
        let definition = StrategyDefinition {
            rules: vec![
                StrategyRule::new(
                    3,
                    RuleKind::RangeWidth(RangeWidthParameters {
                        base_range_percent: 4.0,
                        dynamic_widening: Some(DynamicWidening {
                            enabled: true,
                            volatility_threshold: 0.05,
                            widen_to_percent: 8.0,
                        }),
                        rebalance_buffer: 0.1,
                    }),
                ),
                StrategyRule::new(
                    1,
                    RuleKind::PriceThreshold(PriceThresholdParameters {
                        asset: "WETH".to_string(),
                        operator: ThresholdOperator::LessThan,
                        price_usd: dec!(3000),
                        action: RuleAction::ExitToStable,
                        target_asset: "USDC".to_string(),
                    }),
                ),
                StrategyRule::new(
                    2,
                    RuleKind::VolatilityTrigger(VolatilityTriggerParameters {
                        threshold: 0.12,
                        window: "24h".to_string(),
                        action: RuleAction::PauseRebalancing,
                    }),
                ),
            ],
            feed_requirements: Vec::new(),
            summary: String::new(),
        };

        assert_eq!(
            definition.generate_summary(),
            "Maintain ±4% range, widen to ±8% if volatility > 5%, \
             exit to USDC if WETH below $3,000, pause rebalancing if volatility > 12%"
        );
        assert_eq!(definition.summary_text(), definition.generate_summary());
    }

    #[test]
    fn test_stored_summary_wins() {
        let mut definition = StrategyDefinition::new(Vec::new());
        definition.summary = "Hold steady".to_string();
        assert_eq!(definition.summary_text(), "Hold steady");
    }
}
