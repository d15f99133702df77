pub mod pool;
pub mod token;

// Re-export for easier access
pub use pool::{FeeMetrics, PoolSnapshot};
pub use token::Token;
