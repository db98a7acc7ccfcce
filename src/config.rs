use crate::error::SignalError;
use crate::types::Symbol;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_TARGET_QUANTITY: i64 = 20;
pub const DEFAULT_SYMBOL: &str = "IBM";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Validation(#[from] SignalError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window length of the moving average, in observations.
    pub period: usize,
    /// Absolute position size requested on a cross-up.
    pub target_quantity: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            target_quantity: DEFAULT_TARGET_QUANTITY,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), SignalError> {
        // Two points are the minimum needed to see a crossing.
        if self.period < 2 {
            return Err(SignalError::invalid_configuration(format!(
                "period must be at least 2, got {}",
                self.period
            )));
        }
        if self.target_quantity <= 0 {
            return Err(SignalError::invalid_configuration(format!(
                "target_quantity must be positive, got {}",
                self.target_quantity
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub symbol: Symbol,
    pub engine: EngineConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            symbol: Symbol::new(DEFAULT_SYMBOL),
            engine: EngineConfig::default(),
        }
    }
}

impl BotConfig {
    pub fn from_json_str(raw: &str, path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let cfg: BotConfig = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.into(),
            source,
        })?;
        cfg.engine.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw, path)
    }
}
