use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid configuration file: {0}")]
    InvalidConfig(#[from] serde_yml::Error),
    #[error("Invalid configuration: {0}")]
    InvalidValue(String),
}

/// Tunables of the software engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Run every call on tokio's blocking pool. Outside a tokio runtime calls run on the polling thread instead.
    pub use_blocking_pool: bool,
    /// The longest list argument (blinds, commitments, keys or signatures) a call accepts. Unlimited when absent.
    pub max_list_length: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { use_blocking_pool: true, max_list_length: None }
    }
}

impl EngineConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: EngineConfig = serde_yml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_yml::to_writer(writer, self)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_list_length == Some(0) {
            return Err(ConfigError::InvalidValue("max_list_length must be at least 1".into()));
        }
        Ok(())
    }
}
