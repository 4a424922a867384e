//! Alpaca API credential resolution.
//!
//! Credentials come from the environment when present (`APCA_API_KEY_ID` /
//! `APCA_API_SECRET_KEY`, the variable names Alpaca's own tooling uses) and
//! otherwise from a JSON secrets file with `ALPACA_API_KEY_ID` /
//! `ALPACA_API_SECRET_KEY` keys. Key material is held in
//! [`secrecy::SecretString`] so it never lands in debug output or logs.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;
use shared_utils::env::get_env_var;
use thiserror::Error;

/// Environment variable holding the API key id.
pub const ENV_API_KEY_ID: &str = "APCA_API_KEY_ID";
/// Environment variable holding the API secret key.
pub const ENV_API_SECRET_KEY: &str = "APCA_API_SECRET_KEY";

/// API key pair for Alpaca's market data endpoints.
pub struct AlpacaCredentials {
    pub api_key: SecretString,
    pub secret_key: SecretString,
}

/// Errors that can occur while resolving credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Neither the environment nor a secrets file provided a key pair.
    #[error(
        "no Alpaca credentials found: set {ENV_API_KEY_ID} and {ENV_API_SECRET_KEY} \
         or configure a secrets file"
    )]
    NotFound,

    /// The secrets file could not be read.
    #[error("failed to read secrets file {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The secrets file is not the expected JSON shape.
    #[error("malformed secrets file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct SecretsFile {
    #[serde(rename = "ALPACA_API_KEY_ID")]
    api_key: String,
    #[serde(rename = "ALPACA_API_SECRET_KEY")]
    secret_key: String,
}

impl AlpacaCredentials {
    /// Reads the key pair from the environment.
    pub fn from_env() -> Option<Self> {
        let api_key = get_env_var(ENV_API_KEY_ID).ok()?;
        let secret_key = get_env_var(ENV_API_SECRET_KEY).ok()?;
        Some(Self {
            api_key: SecretString::new(api_key.into()),
            secret_key: SecretString::new(secret_key.into()),
        })
    }

    /// Reads the key pair from a JSON secrets file.
    pub fn from_file(path: &Path) -> Result<Self, CredentialError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CredentialError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let secrets: SecretsFile =
            serde_json::from_str(&contents).map_err(|source| CredentialError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            api_key: SecretString::new(secrets.api_key.into()),
            secret_key: SecretString::new(secrets.secret_key.into()),
        })
    }

    /// Resolves credentials: environment first, then the secrets file if one
    /// is configured.
    pub fn resolve(secrets_file: Option<&Path>) -> Result<Self, CredentialError> {
        if let Some(creds) = Self::from_env() {
            return Ok(creds);
        }
        match secrets_file {
            Some(path) => Self::from_file(path),
            None => Err(CredentialError::NotFound),
        }
    }
}
