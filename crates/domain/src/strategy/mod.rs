pub mod definition;
pub mod presets;
pub mod summary;

pub use definition::{
    DynamicWidening, PriceThresholdParameters, RangeWidthParameters, RuleKind,
    StrategyDefinition, StrategyRule, VolatilityTriggerParameters,
};
pub use presets::{preset_definition, preset_text};
