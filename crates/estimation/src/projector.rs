//! Weekly and annualized return projection for a liquidity range.

use crate::config::EstimatorConfig;
use crate::error::EstimationError;
use crate::rebalance_cost::{RebalanceCosts, estimate_rebalance_costs};
use crate::time_in_range::{TimeInRange, volatility_ratio};
use rangeseeker_domain::entities::pool::PoolSnapshot;
use rangeseeker_domain::math::concentrated_liquidity::{LiquidityQuote, liquidity_for_investment};
use rangeseeker_domain::metrics::fees::{annualize_weekly_percent, return_percent};
use rangeseeker_domain::strategy::StrategyDefinition;
use rangeseeker_domain::value_objects::earnings_estimate::{CaseResult, EarningsEstimate};
use rangeseeker_domain::value_objects::price::Price;
use rangeseeker_domain::value_objects::range_width::RangeWidth;
use tracing::debug;

/// Intermediate values behind an estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionBreakdown {
    pub range: RangeWidth,
    pub liquidity: LiquidityQuote,
    /// Fees the position would earn if in range all week.
    pub max_weekly_earnings_usd: f64,
    pub volatility_ratio: f64,
    pub time_in_range: TimeInRange,
    pub rebalance_costs: RebalanceCosts,
    pub estimate: EarningsEstimate,
}

fn case_result(weekly_usd: f64, config: &EstimatorConfig) -> CaseResult {
    let weekly_percent = return_percent(weekly_usd, config.investment_usd);
    CaseResult {
        weekly_usd,
        weekly_percent,
        apy_percent: annualize_weekly_percent(weekly_percent, config.weeks_per_year),
    }
}

/// Combines full-time fee income with the time-in-range and gas heuristics.
///
/// `weekly = max_weekly * time_in_range - rebalance_cost` for each case.
pub fn project_cases(
    max_weekly_earnings_usd: f64,
    volatility_ratio: f64,
    config: &EstimatorConfig,
) -> (TimeInRange, RebalanceCosts, EarningsEstimate) {
    let time_in_range = config.time_in_range.lookup(volatility_ratio);
    let costs = estimate_rebalance_costs(volatility_ratio, &config.rebalance);

    let best = max_weekly_earnings_usd * time_in_range.best_case - costs.best_case_weekly_usd;
    let worst = max_weekly_earnings_usd * time_in_range.worst_case - costs.worst_case_weekly_usd;

    let estimate = EarningsEstimate {
        best_case: case_result(best, config),
        worst_case: case_result(worst, config),
    };
    (time_in_range, costs, estimate)
}

/// Full projection with its intermediate values.
///
/// Returns `None` when the snapshot lacks fee data, a usable price or a
/// usable 7-day volatility.
pub fn explain_returns(
    snapshot: &PoolSnapshot,
    range: RangeWidth,
    config: &EstimatorConfig,
) -> Option<ProjectionBreakdown> {
    let Some(fees) = snapshot.fee_metrics() else {
        debug!(
            fee_growth_7d = snapshot.fee_growth_7d,
            fee_rate = snapshot.fee_rate,
            "Fee data unavailable, skipping estimate"
        );
        return None;
    };
    let Ok(price) = Price::positive(snapshot.current_price) else {
        debug!(price = snapshot.current_price, "No usable price, skipping estimate");
        return None;
    };
    if !snapshot.volatility_7d.is_finite() || snapshot.volatility_7d < 0.0 {
        debug!(
            volatility_7d = snapshot.volatility_7d,
            "No usable volatility, skipping estimate"
        );
        return None;
    }

    let liquidity = liquidity_for_investment(
        price,
        range,
        config.investment_usd,
        snapshot.token0_decimals,
        snapshot.token1_decimals,
    );
    let max_weekly_earnings_usd = fees.fee_growth_7d * fees.fee_rate * liquidity.raw_liquidity;
    let ratio = volatility_ratio(snapshot.volatility_7d, range);
    let (time_in_range, rebalance_costs, estimate) =
        project_cases(max_weekly_earnings_usd, ratio, config);

    debug!(
        range = %range,
        raw_liquidity = liquidity.raw_liquidity,
        max_weekly_earnings_usd,
        volatility_ratio = ratio,
        best_weekly_usd = estimate.best_case.weekly_usd,
        worst_weekly_usd = estimate.worst_case.weekly_usd,
        "Projected returns"
    );

    Some(ProjectionBreakdown {
        range,
        liquidity,
        max_weekly_earnings_usd,
        volatility_ratio: ratio,
        time_in_range,
        rebalance_costs,
        estimate,
    })
}

/// Best/worst case weekly and annualized returns for `range`.
pub fn project_returns(
    snapshot: &PoolSnapshot,
    range: RangeWidth,
    config: &EstimatorConfig,
) -> Option<EarningsEstimate> {
    explain_returns(snapshot, range, config).map(|b| b.estimate)
}

/// Projects returns under a fixed calibration.
#[derive(Debug, Clone, Default)]
pub struct EarningsEstimator {
    config: EstimatorConfig,
}

impl EarningsEstimator {
    /// Creates an estimator after validating its calibration.
    pub fn new(config: EstimatorConfig) -> Result<Self, EstimationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn estimate(&self, snapshot: &PoolSnapshot, range: RangeWidth) -> Option<EarningsEstimate> {
        project_returns(snapshot, range, &self.config)
    }

    pub fn explain(&self, snapshot: &PoolSnapshot, range: RangeWidth) -> Option<ProjectionBreakdown> {
        explain_returns(snapshot, range, &self.config)
    }

    /// Estimates a strategy at the range it would run right now, i.e. after
    /// dynamic widening against the snapshot's 24h volatility.
    ///
    /// `Ok(None)` when the strategy has no range rule or fee data is missing.
    pub fn estimate_strategy(
        &self,
        snapshot: &PoolSnapshot,
        definition: &StrategyDefinition,
    ) -> Result<Option<ProjectionBreakdown>, EstimationError> {
        let Some(range) = definition.effective_range(snapshot.volatility_24h)? else {
            debug!("Strategy has no range rule, skipping estimate");
            return Ok(None);
        };
        Ok(self.explain(snapshot, range))
    }
}
