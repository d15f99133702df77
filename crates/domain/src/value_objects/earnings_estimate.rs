use serde::{Deserialize, Serialize};

/// Projected return for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub weekly_usd: f64,
    pub weekly_percent: f64,
    pub apy_percent: f64,
}

/// Best and worst case projections for a liquidity range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsEstimate {
    pub best_case: CaseResult,
    pub worst_case: CaseResult,
}

impl EarningsEstimate {
    /// Mean of the best and worst weekly USD figures.
    pub fn midpoint_weekly_usd(&self) -> f64 {
        (self.best_case.weekly_usd + self.worst_case.weekly_usd) / 2.0
    }
}
