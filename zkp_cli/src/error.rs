use libzkp::engine::{ConfigError, EngineError};
use libzkp::OperationFailed;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Could not start the engine: {0}")]
    Engine(#[from] EngineError),
    #[error("Could not format output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("The {0} operation failed. Run with RUST_LOG=warn for details.")]
    OperationFailed(&'static str),
}

impl CliError {
    /// Names the failed operation, since [`OperationFailed`] carries no detail of its own.
    pub fn failed(operation: &'static str) -> impl FnOnce(OperationFailed) -> CliError {
        move |_| CliError::OperationFailed(operation)
    }
}
