use crate::engine::{EngineError, Operation};
use hex::FromHexError;
use thiserror::Error;

/// The single failure outcome of every facade operation.
///
/// It deliberately carries no detail: malformed input, invalid curve objects, failed cryptographic checks and
/// transport problems all collapse into this value. The detail is logged (see [`BoundaryError`]) before it is
/// discarded. Because it lives in the `Err` arm of a `Result`, a predicate that legitimately answers `false` can never
/// be mistaken for a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Operation failed")]
pub struct OperationFailed;

/// Result type returned by every facade operation.
pub type FacadeResult<T> = Result<T, OperationFailed>;

/// Detailed reasons for a failure at the engine boundary. Never returned to facade callers.
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("{role} must be {expected} bytes long, but got {actual}")]
    InvalidLength { role: &'static str, expected: String, actual: usize },
    #[error("Could not decode hex for {role}: {source}")]
    InvalidHex { role: &'static str, source: FromHexError },
    #[error("Value is not a 64-bit decimal integer: {0:?}")]
    InvalidDecimal(String),
    #[error("Engine returned an unexpected response to {operation}: {response}")]
    UnexpectedResponse { operation: Operation, response: String },
    #[error("Secret nonce, public nonce and public nonce total must be supplied together or not at all")]
    IncompleteNonceGroup,
    #[error("{0}")]
    Engine(#[from] EngineError),
}

impl From<BoundaryError> for OperationFailed {
    fn from(_: BoundaryError) -> Self {
        OperationFailed
    }
}
