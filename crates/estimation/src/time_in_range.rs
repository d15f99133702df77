use crate::config::TimeInRangeTable;
use rangeseeker_domain::value_objects::range_width::RangeWidth;
use serde::{Deserialize, Serialize};

/// Expected fraction of a week the position earns fees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInRange {
    pub best_case: f64,
    pub worst_case: f64,
}

/// Weekly volatility measured in units of range half-width.
pub fn volatility_ratio(volatility_7d: f64, width: RangeWidth) -> f64 {
    volatility_7d / width.fraction()
}

/// Looks up best/worst time in range for a 7d volatility and a range width.
///
/// Tighter ranges relative to volatility spend less time in range; the
/// worst case stays bounded because the agent rebalances back into range.
pub fn estimate_time_in_range(
    volatility_7d: f64,
    width: RangeWidth,
    table: &TimeInRangeTable,
) -> TimeInRange {
    table.lookup(volatility_ratio(volatility_7d, width))
}
