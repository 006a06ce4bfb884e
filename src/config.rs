// In: src/config.rs

//! The single source of truth for bitmap engine configuration.
//!
//! `BitmapConfig` is created once at the application boundary (typically from a
//! JSON document) and then used to build the memory pool handed to the allocating
//! kernels, select the bulk generation strategy, and initialise logging.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::BitmapError;
use crate::memory_pool::{BudgetedMemoryPool, MemoryPool, SystemMemoryPool};

//==================================================================================
// I. Core Configuration Enums & Structs
//==================================================================================

/// Which bulk bit generator to run. Both produce byte-identical output.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStrategy {
    /// One generator call and one mask update per bit. The reference implementation.
    Simple,

    /// **Default:** Eight generator calls per full byte, no per-bit mask bookkeeping.
    #[default]
    Unrolled,
}

/// Defines the memory pool used by the allocating kernels.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolConfig {
    /// Lifetime allocation budget in bytes. `None` means unbounded.
    #[serde(default)]
    pub capacity_bytes: Option<usize>,
}

/// Defines logging verbosity and destination.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// A `log::LevelFilter` name: "off", "error", "warn", "info", "debug" or "trace".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Append log lines to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_file: None,
        }
    }
}

impl LoggingConfig {
    /// Parses `level` into a `LevelFilter`.
    pub fn level_filter(&self) -> Result<LevelFilter, BitmapError> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| BitmapError::InvalidConfig(format!("unknown log level '{}'", self.level)))
    }
}

//==================================================================================
// II. The Unified BitmapConfig
//==================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct BitmapConfig {
    #[serde(default)]
    pub pool: PoolConfig,

    #[serde(default)]
    pub generation: GenerationStrategy,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BitmapConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, BitmapError> {
        let config: BitmapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, BitmapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), BitmapError> {
        self.logging.level_filter()?;
        Ok(())
    }

    /// Builds the memory pool described by `pool`.
    pub fn build_pool(&self) -> Box<dyn MemoryPool> {
        match self.pool.capacity_bytes {
            Some(capacity) => Box::new(BudgetedMemoryPool::new(capacity)),
            None => Box::new(SystemMemoryPool::new()),
        }
    }
}

/// Helper for `serde` to provide a default for `LoggingConfig::level`.
fn default_log_level() -> String {
    "warn".to_string()
}
