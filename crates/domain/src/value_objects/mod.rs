pub mod earnings_estimate;
pub mod price;
pub mod price_point;
pub mod price_range;
pub mod range_width;

pub use earnings_estimate::{CaseResult, EarningsEstimate};
pub use price::Price;
pub use price_point::PricePoint;
pub use price_range::PriceRange;
pub use range_width::RangeWidth;
