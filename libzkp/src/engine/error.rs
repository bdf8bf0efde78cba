use thiserror::Error;

/// Why an engine call failed. The facade logs these and then discards them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Invalid cryptographic object: {0}")]
    InvalidObject(String),
    #[error("Cryptographic failure: {0}")]
    CryptographicFailure(String),
    #[error("Engine call could not be completed: {0}")]
    Transport(String),
}

impl EngineError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        EngineError::MalformedInput(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        EngineError::InvalidObject(msg.into())
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        EngineError::CryptographicFailure(msg.into())
    }
}
