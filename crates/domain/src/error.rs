use thiserror::Error;

/// Errors raised while building domain values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A range width fell outside the open interval (0, 1) once expressed as a fraction.
    #[error("invalid range width: {0} (expected a fraction in (0, 1))")]
    InvalidRangeWidth(f64),

    /// A price was zero, negative or not finite.
    #[error("price must be positive and finite, got {0}")]
    InvalidPrice(f64),

    /// The strategy definition could not be decoded.
    #[error("malformed strategy definition: {0}")]
    MalformedStrategy(String),

    /// The strategy definition decoded but violates a structural rule.
    #[error("invalid strategy definition: {0}")]
    InvalidStrategy(String),

    /// A tick range where the lower bound is not below the upper bound.
    #[error("invalid tick range [{lower}, {upper}]")]
    InvalidTickRange {
        /// Lower tick.
        lower: i32,
        /// Upper tick.
        upper: i32,
    },
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedStrategy(err.to_string())
    }
}
