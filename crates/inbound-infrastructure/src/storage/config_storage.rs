//! `config.toml` storage.

use super::atomic_file::AtomicFile;
use inbound_core::Result;
use inbound_core::config::AppConfig;
use std::path::{Path, PathBuf};

/// Loads and updates [`AppConfig`]. A missing file means defaults.
pub struct ConfigStorage {
    file: AtomicFile<AppConfig>,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::toml(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn exists(&self) -> bool {
        self.file.path().exists()
    }

    pub fn load(&self) -> Result<AppConfig> {
        Ok(self.file.load()?.unwrap_or_default())
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        self.file.replace(config)?;
        tracing::info!("[ConfigStorage] Saved {}", self.file.path().display());
        Ok(())
    }

    /// Applies one `key = value` change and returns the updated config.
    ///
    /// Nothing is written when the value is rejected.
    pub fn set(&self, key: &str, value: &str) -> Result<AppConfig> {
        let config = self
            .file
            .update(AppConfig::default(), |config| config.set(key, value))?;
        tracing::info!("[ConfigStorage] Updated {} in {}", key, self.file.path().display());
        Ok(config)
    }
}
