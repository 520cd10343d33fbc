use thiserror::Error;

/// Crate-wide error kinds, per the error taxonomy the search layer relies on.
///
/// `BinOperationRefused` is intentionally not a variant here: it is a local,
/// recoverable signal used inside [`crate::repair`] and GA crossover, never
/// meant to propagate to a driver. See [`crate::domain::bin::BinRefused`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("instance invalid: {0}")]
    InstanceInvalid(String),

    #[error("io failure: {0}")]
    IoFailure(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
