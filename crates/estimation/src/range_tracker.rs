//! Realized range behaviour over a historical price path.
//!
//! The tracker replays prices against a band that recentres whenever price
//! drifts past the rebalance threshold, the way an agent running a
//! `RANGE_WIDTH` rule behaves. Its output is a measured counterpart to the
//! time-in-range and rebalance heuristics.

use rangeseeker_domain::DomainError;
use rangeseeker_domain::strategy::RangeWidthParameters;
use rangeseeker_domain::value_objects::price::Price;
use rangeseeker_domain::value_objects::price_point::PricePoint;
use rangeseeker_domain::value_objects::price_range::PriceRange;
use rangeseeker_domain::value_objects::range_width::RangeWidth;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Aggregate results of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerSummary {
    pub observations: u64,
    /// Fraction of observations that fell inside the active band.
    pub time_in_range: f64,
    pub rebalance_count: u32,
    pub total_gas_usd: f64,
}

#[derive(Debug, Clone)]
pub struct RangeTracker {
    width: RangeWidth,
    /// Relative distance from the centre that triggers a rebalance.
    rebalance_threshold: f64,
    gas_per_rebalance_usd: f64,
    center: Option<Price>,
    observations: u64,
    in_range: u64,
    rebalance_count: u32,
}

impl RangeTracker {
    /// Creates a tracker that rebalances once price is more than
    /// `width * (1 + rebalance_buffer)` away from the band centre.
    #[must_use]
    pub fn new(width: RangeWidth, rebalance_buffer: f64, gas_per_rebalance_usd: f64) -> Self {
        Self {
            width,
            rebalance_threshold: width.fraction() * (1.0 + rebalance_buffer.max(0.0)),
            gas_per_rebalance_usd,
            center: None,
            observations: 0,
            in_range: 0,
            rebalance_count: 0,
        }
    }

    /// Creates a tracker for a strategy's base range.
    pub fn from_rule(
        params: &RangeWidthParameters,
        gas_per_rebalance_usd: f64,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(
            params.base_range()?,
            params.rebalance_buffer,
            gas_per_rebalance_usd,
        ))
    }

    /// Band currently held, once the first price has been seen.
    pub fn current_range(&self) -> Option<PriceRange> {
        self.center.map(|c| PriceRange::around(c, self.width))
    }

    /// Records one observation. Returns true when it caused a rebalance.
    ///
    /// The observation is scored against the band held before any
    /// rebalance it triggers.
    pub fn record(&mut self, price: Price) -> bool {
        self.observations += 1;

        let Some(center) = self.center else {
            self.center = Some(price);
            self.in_range += 1;
            return false;
        };

        if PriceRange::around(center, self.width).contains(price) {
            self.in_range += 1;
        }

        let drift = if center.value > 0.0 {
            (price.value - center.value).abs() / center.value
        } else {
            f64::INFINITY
        };

        if drift > self.rebalance_threshold {
            debug!(
                from = center.value,
                to = price.value,
                drift,
                "Recentring range"
            );
            self.center = Some(price);
            self.rebalance_count += 1;
            return true;
        }
        false
    }

    /// Replays a series in timestamp order.
    ///
    /// Points without a positive, finite price are skipped and do not count
    /// as observations.
    pub fn replay(&mut self, points: &[PricePoint]) -> TrackerSummary {
        let mut ordered = points.to_vec();
        ordered.sort_by_key(|p| p.timestamp);

        let mut skipped = 0usize;
        for point in ordered {
            match Price::positive(point.price) {
                Ok(price) => {
                    self.record(price);
                }
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(skipped, "Skipped price points without a usable price");
        }
        self.summary()
    }

    pub fn summary(&self) -> TrackerSummary {
        let time_in_range = if self.observations == 0 {
            0.0
        } else {
            self.in_range as f64 / self.observations as f64
        };
        TrackerSummary {
            observations: self.observations,
            time_in_range,
            rebalance_count: self.rebalance_count,
            total_gas_usd: f64::from(self.rebalance_count) * self.gas_per_rebalance_usd,
        }
    }
}
