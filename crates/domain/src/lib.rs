//! Domain model for Uniswap V3 liquidity agents.
//!
//! This crate holds the pure building blocks shared by the estimator and
//! the command line tooling:
//! - Value objects (prices, ranges, range widths, earnings estimates)
//! - Entities (tokens, pool snapshots)
//! - Concentrated-liquidity and tick math
//! - Volatility and annualization metrics
//! - Strategy definitions and their natural-language presets

/// Domain error types.
pub mod error;
/// Shared enumerations.
pub mod enums;
/// Pool fee tiers.
pub mod fees;
/// Entities supplied by data providers.
pub mod entities;
/// Pure math.
pub mod math;
/// Derived metrics.
pub mod metrics;
/// Strategy definitions.
pub mod strategy;
/// Immutable value objects.
pub mod value_objects;

pub use error::DomainError;
