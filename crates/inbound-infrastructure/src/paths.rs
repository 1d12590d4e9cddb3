//! Path management for inbound configuration and data files.
//!
//! ```text
//! ~/.config/inbound/           # Config directory
//! ├── config.toml              # Application configuration
//! ├── secret.json              # API keys
//! └── logs/                    # Application logs
//!     └── inbound.log.YYYY-MM-DD
//!
//! ~/.local/share/inbound/      # Data directory
//! └── session.json             # Last query and its leads
//! ```
//!
//! Both roots can be overridden, which tests and portable installs rely on.

use inbound_core::config::{GeminiConfig, SecretConfig};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "inbound";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config or data directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for inbound_core::InboundError {
    fn from(e: PathError) -> Self {
        inbound_core::InboundError::config(e.to_string())
    }
}

/// Resolved config and data directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl InboundPaths {
    /// Resolves the platform directories, honoring any overrides.
    pub fn resolve(
        config_override: Option<PathBuf>,
        data_override: Option<PathBuf>,
    ) -> Result<Self, PathError> {
        let config_dir = match config_override {
            Some(dir) => dir,
            None => dirs::config_dir()
                .ok_or(PathError::HomeDirNotFound)?
                .join(APP_DIR),
        };
        let data_dir = match data_override {
            Some(dir) => dir,
            None => dirs::data_dir()
                .ok_or(PathError::HomeDirNotFound)?
                .join(APP_DIR),
        };
        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Uses `root/config` and `root/data`. Handy for tests.
    pub fn under(root: &Path) -> Self {
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to `secret.json`. Keep it at mode 600.
    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    /// Ensures the secret file exists, creating a template if it doesn't.
    ///
    /// Returns the path and whether the file was created. New files get
    /// permissions 600 on Unix.
    pub fn ensure_secret_file(&self) -> std::io::Result<(PathBuf, bool)> {
        let secret_path = self.secret_file();
        if secret_path.exists() {
            return Ok((secret_path, false));
        }

        std::fs::create_dir_all(&self.config_dir)?;

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: None,
            }),
        };
        let template_json = serde_json::to_string_pretty(&template)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&secret_path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok((secret_path, true))
    }
}
