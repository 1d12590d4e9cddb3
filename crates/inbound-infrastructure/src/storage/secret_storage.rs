//! Secret configuration file storage.
//!
//! Reads `secret.json`. The `GEMINI_API_KEY` environment variable, when set,
//! takes precedence over the key stored in the file.

use inbound_core::InboundError;
use inbound_core::config::{GeminiConfig, SecretConfig};
use std::fs;
use std::path::PathBuf;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// No Gemini key in the environment or the file.
    MissingApiKey(PathBuf),
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => write!(
                f,
                "Secret file not found at {} (run `inbound init` or set {})",
                path.display(),
                GEMINI_API_KEY_ENV
            ),
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            SecretStorageError::MissingApiKey(path) => write!(
                f,
                "No Gemini API key configured: set {} or fill in gemini.api_key in {}",
                GEMINI_API_KEY_ENV,
                path.display()
            ),
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

impl From<SecretStorageError> for InboundError {
    fn from(e: SecretStorageError) -> Self {
        InboundError::config(e.to_string())
    }
}

/// Read-only access to `secret.json`.
///
/// The file is plaintext; keep it at mode 600. Keys are never logged.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads and parses the secret file.
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Gemini credentials, reading the key from the process environment first.
    pub fn gemini(&self) -> Result<GeminiConfig, SecretStorageError> {
        self.gemini_with_env(std::env::var(GEMINI_API_KEY_ENV).ok())
    }

    /// Like [`gemini`](Self::gemini) with an explicit environment value.
    pub fn gemini_with_env(
        &self,
        env_key: Option<String>,
    ) -> Result<GeminiConfig, SecretStorageError> {
        let env_key = env_key.filter(|key| !key.trim().is_empty());

        let stored = match self.load() {
            Ok(config) => config.gemini,
            Err(SecretStorageError::NotFound(_)) if env_key.is_some() => None,
            Err(e) => return Err(e),
        };

        match (env_key, stored) {
            (Some(api_key), stored) => {
                tracing::debug!("[SecretStorage] Using Gemini key from {}", GEMINI_API_KEY_ENV);
                Ok(GeminiConfig {
                    api_key,
                    model_name: stored.and_then(|g| g.model_name),
                })
            }
            (None, Some(gemini)) if !gemini.api_key.trim().is_empty() => Ok(gemini),
            (None, _) => Err(SecretStorageError::MissingApiKey(self.path.clone())),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
