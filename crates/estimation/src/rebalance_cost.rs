use crate::config::RebalanceCostModel;
use serde::{Deserialize, Serialize};

/// Expected weekly rebalancing activity and its gas bill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebalanceCosts {
    pub best_case_rebalances_per_week: f64,
    pub worst_case_rebalances_per_week: f64,
    pub best_case_weekly_usd: f64,
    pub worst_case_weekly_usd: f64,
}

/// Estimates weekly gas spend from the volatility ratio.
pub fn estimate_rebalance_costs(volatility_ratio: f64, model: &RebalanceCostModel) -> RebalanceCosts {
    let best = model
        .best_case_floor
        .max(volatility_ratio * model.best_case_rate);
    let worst = model
        .worst_case_floor
        .max(volatility_ratio * model.worst_case_rate)
        .min(model.worst_case_cap);

    RebalanceCosts {
        best_case_rebalances_per_week: best,
        worst_case_rebalances_per_week: worst,
        best_case_weekly_usd: best * model.gas_per_rebalance_usd,
        worst_case_weekly_usd: worst * model.gas_per_rebalance_usd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floors_apply_at_low_ratio() {
        let costs = estimate_rebalance_costs(0.0, &RebalanceCostModel::default());
        assert_eq!(costs.best_case_rebalances_per_week, 0.3);
        assert_eq!(costs.worst_case_rebalances_per_week, 0.5);
        assert!((costs.best_case_weekly_usd - 0.9).abs() < 1e-12);
        assert_eq!(costs.worst_case_weekly_usd, 1.5);
    }

    #[test]
    fn test_scales_with_ratio() {
        let costs = estimate_rebalance_costs(2.5, &RebalanceCostModel::default());
        assert_eq!(costs.best_case_rebalances_per_week, 0.625);
        assert_eq!(costs.best_case_weekly_usd, 1.875);
        assert_eq!(costs.worst_case_rebalances_per_week, 1.25);
        assert_eq!(costs.worst_case_weekly_usd, 3.75);
    }

    #[test]
    fn test_worst_case_capped() {
        let costs = estimate_rebalance_costs(10.0, &RebalanceCostModel::default());
        assert_eq!(costs.worst_case_rebalances_per_week, 2.0);
        assert_eq!(costs.worst_case_weekly_usd, 6.0);
        // Best case is not capped.
        assert_eq!(costs.best_case_rebalances_per_week, 2.5);
    }

    #[test]
    fn test_custom_gas() {
        let costs = estimate_rebalance_costs(2.5, &RebalanceCostModel::with_gas(0.2));
        assert!((costs.best_case_weekly_usd - 0.125).abs() < 1e-12);
    }
}
