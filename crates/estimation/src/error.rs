use rangeseeker_domain::DomainError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the estimation crate.
///
/// A projection that cannot be made for lack of fee data is not an error;
/// it is reported as `None` by the projector.
#[derive(Debug, Error)]
pub enum EstimationError {
    #[error("invalid estimator config: {0}")]
    InvalidConfig(String),

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
