//! Run configuration.
//!
//! Everything that used to be ambient (symbol list, fetch window size, store
//! root) is an explicit value threaded into the orchestrator at
//! construction. Loaded from TOML:
//!
//! ```toml
//! symbols = ["AAPL", "MSFT", "GOOGL"]
//! days_to_fetch = 7
//! data_dir = "local_bucket"
//! secrets_file = "config/alpaca.secrets"   # optional
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    #[error("config lists no symbols")]
    NoSymbols,

    #[error("days_to_fetch must be at least 1")]
    ZeroWindow,
}

/// Configuration for one archive run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Tickers to reconcile, in processing order.
    pub symbols: Vec<String>,
    /// How many calendar days back each fetch window reaches.
    pub days_to_fetch: u32,
    /// Root directory of the local artifact store.
    pub data_dir: PathBuf,
    /// Optional JSON secrets file, used when API keys are not in the
    /// environment.
    #[serde(default)]
    pub secrets_file: Option<PathBuf>,
}

impl ArchiveConfig {
    /// Parses and validates a TOML config string.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(contents)?;
        config.normalize()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    // Uppercase symbols, drop empties, dedupe preserving first occurrence.
    fn normalize(&mut self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        self.symbols = self
            .symbols
            .iter()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.clone()))
            .collect();

        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        if self.days_to_fetch == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        Ok(())
    }
}
