use rangeseeker_domain::DomainError;
use rangeseeker_domain::math::price_tick::{MAX_TICK, MIN_TICK};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Share of the tick range treated as the danger zone at each edge.
pub const DEFAULT_EDGE_FRACTION: f64 = 0.1;

/// Where the pool tick sits relative to a position's ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionHealth {
    InRange,
    /// In range but within the edge zone of a bound.
    NearEdge {
        distance_from_lower: i32,
        distance_from_upper: i32,
    },
    OutOfRange,
}

impl PositionHealth {
    pub fn needs_rebalance(&self) -> bool {
        !matches!(self, Self::InRange)
    }
}

/// Classifies a position by the current pool tick.
///
/// Bounds are inclusive and must lie within `MIN_TICK..=MAX_TICK`. A tick
/// closer than `edge_fraction` of the range width to either bound is
/// reported as near the edge.
pub fn check_position(
    current_tick: i32,
    tick_lower: i32,
    tick_upper: i32,
    edge_fraction: f64,
) -> Result<PositionHealth, DomainError> {
    let in_domain = |tick: i32| (MIN_TICK..=MAX_TICK).contains(&tick);
    if tick_lower >= tick_upper || !in_domain(tick_lower) || !in_domain(tick_upper) {
        return Err(DomainError::InvalidTickRange {
            lower: tick_lower,
            upper: tick_upper,
        });
    }

    if current_tick < tick_lower || current_tick > tick_upper {
        debug!(current_tick, tick_lower, tick_upper, "Position out of range");
        return Ok(PositionHealth::OutOfRange);
    }

    let range_size = f64::from(tick_upper) - f64::from(tick_lower);
    let from_lower = current_tick - tick_lower;
    let from_upper = tick_upper - current_tick;
    let edge = range_size * edge_fraction;

    if f64::from(from_lower) < edge || f64::from(from_upper) < edge {
        debug!(from_lower, from_upper, edge, "Position near range edge");
        return Ok(PositionHealth::NearEdge {
            distance_from_lower: from_lower,
            distance_from_upper: from_upper,
        });
    }
    Ok(PositionHealth::InRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range() {
        let health = check_position(0, -1000, 1000, DEFAULT_EDGE_FRACTION).unwrap();
        assert_eq!(health, PositionHealth::InRange);
        assert!(!health.needs_rebalance());
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            check_position(1001, -1000, 1000, DEFAULT_EDGE_FRACTION).unwrap(),
            PositionHealth::OutOfRange
        );
        assert_eq!(
            check_position(-1001, -1000, 1000, DEFAULT_EDGE_FRACTION).unwrap(),
            PositionHealth::OutOfRange
        );
    }

    #[test]
    fn test_near_edge() {
        // Range 2000 ticks, edge zone 200.
        let health = check_position(850, -1000, 1000, DEFAULT_EDGE_FRACTION).unwrap();
        assert_eq!(
            health,
            PositionHealth::NearEdge {
                distance_from_lower: 1850,
                distance_from_upper: 150,
            }
        );
        assert!(health.needs_rebalance());
        // Exactly on the edge zone boundary is still fine.
        assert_eq!(
            check_position(800, -1000, 1000, DEFAULT_EDGE_FRACTION).unwrap(),
            PositionHealth::InRange
        );
    }

    #[test]
    fn test_bounds_inclusive() {
        let health = check_position(1000, -1000, 1000, DEFAULT_EDGE_FRACTION).unwrap();
        assert!(matches!(health, PositionHealth::NearEdge { .. }));
    }

    #[test]
    fn test_invalid_range() {
        assert_eq!(
            check_position(0, 10, 10, DEFAULT_EDGE_FRACTION),
            Err(DomainError::InvalidTickRange { lower: 10, upper: 10 })
        );
    }

    #[test]
    fn test_rejects_ticks_outside_pool_domain() {
        assert_eq!(
            check_position(0, i32::MIN, i32::MAX, DEFAULT_EDGE_FRACTION),
            Err(DomainError::InvalidTickRange {
                lower: i32::MIN,
                upper: i32::MAX
            })
        );
        assert!(check_position(0, MIN_TICK - 1, 0, DEFAULT_EDGE_FRACTION).is_err());
    }

    #[test]
    fn test_full_tick_domain() {
        let health = check_position(0, MIN_TICK, MAX_TICK, DEFAULT_EDGE_FRACTION).unwrap();
        assert_eq!(health, PositionHealth::InRange);

        let health = check_position(MAX_TICK, MIN_TICK, MAX_TICK, DEFAULT_EDGE_FRACTION).unwrap();
        assert_eq!(
            health,
            PositionHealth::NearEdge {
                distance_from_lower: 2 * MAX_TICK,
                distance_from_upper: 0,
            }
        );
        // A current tick far outside the domain is simply out of range.
        assert_eq!(
            check_position(i32::MIN, MIN_TICK, MAX_TICK, DEFAULT_EDGE_FRACTION).unwrap(),
            PositionHealth::OutOfRange
        );
    }
}
