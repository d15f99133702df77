//! Starter strategies offered before the user writes their own.

use crate::enums::{Preset, RuleAction, ThresholdOperator};
use crate::strategy::definition::{
    DynamicWidening, PriceThresholdParameters, RangeWidthParameters, RuleKind,
    StrategyDefinition, StrategyRule, VolatilityTriggerParameters,
};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const PRICE_PRIORITY: u32 = 1;
const VOLATILITY_PRIORITY: u32 = 2;
const RANGE_PRIORITY: u32 = 3;
const DEFAULT_REBALANCE_BUFFER: f64 = 0.1;

/// Rounds to whole units, half away from zero.
fn whole(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Fraction of the current price at which each preset exits to USDC.
fn exit_fraction(preset: Preset) -> f64 {
    match preset {
        Preset::Conservative => 0.90,
        Preset::Balanced => 0.92,
        Preset::Aggressive => 0.95,
    }
}

/// Multiplier applied to the current 24h volatility to get each preset's trigger.
fn volatility_multiplier(preset: Preset) -> f64 {
    match preset {
        Preset::Conservative => 1.0,
        Preset::Balanced => 0.8,
        Preset::Aggressive => 1.2,
    }
}

/// Natural-language description of a preset at the current market.
pub fn preset_text(preset: Preset, price: f64, volatility_24h: f64) -> String {
    let exit = whole(price * exit_fraction(preset));
    let current = whole(volatility_24h * 100.0);
    let trigger = whole(volatility_24h * volatility_multiplier(preset) * 100.0);

    match preset {
        Preset::Conservative => format!(
            "Maintain a wide ±8% range to capture fees with minimal rebalancing. \
             Widen to ±15% if volatility exceeds {trigger}% (current: {current}%). \
             Exit to USDC if ETH drops below ${exit} to protect capital."
        ),
        Preset::Balanced => format!(
            "Use a ±4% range for steady fee generation. \
             Dynamically widen to ±8% when volatility goes above {trigger}% (current: {current}%). \
             Exit to USDC if ETH falls below ${exit}."
        ),
        Preset::Aggressive => format!(
            "Tight ±2% range to maximize fee capture in the most active price zone. \
             Accept frequent rebalancing for higher returns. \
             Pause rebalancing if volatility exceeds {trigger}% (current: {current}%). \
             Exit to USDC if ETH drops below ${exit} to lock in profits."
        ),
    }
}

/// Structured rules equivalent to [`preset_text`].
pub fn preset_definition(preset: Preset, price: f64, volatility_24h: f64) -> StrategyDefinition {
    let trigger = volatility_24h * volatility_multiplier(preset);

    let range = |base: f64, widen_to: Option<f64>| {
        StrategyRule::new(
            RANGE_PRIORITY,
            RuleKind::RangeWidth(RangeWidthParameters {
                base_range_percent: base,
                dynamic_widening: widen_to.map(|widen_to_percent| DynamicWidening {
                    enabled: true,
                    volatility_threshold: trigger,
                    widen_to_percent,
                }),
                rebalance_buffer: DEFAULT_REBALANCE_BUFFER,
            }),
        )
    };

    let exit = StrategyRule::new(
        PRICE_PRIORITY,
        RuleKind::PriceThreshold(PriceThresholdParameters {
            asset: "WETH".to_string(),
            operator: ThresholdOperator::LessThan,
            price_usd: whole(price * exit_fraction(preset)),
            action: RuleAction::ExitToStable,
            target_asset: "USDC".to_string(),
        }),
    );

    let rules = match preset {
        Preset::Conservative => vec![exit, range(8.0, Some(15.0))],
        Preset::Balanced => vec![exit, range(4.0, Some(8.0))],
        Preset::Aggressive => vec![
            exit,
            StrategyRule::new(
                VOLATILITY_PRIORITY,
                RuleKind::VolatilityTrigger(VolatilityTriggerParameters {
                    threshold: trigger,
                    window: "24h".to_string(),
                    action: RuleAction::PauseRebalancing,
                }),
            ),
            range(2.0, None),
        ],
    };

    StrategyDefinition::new(rules)
}
