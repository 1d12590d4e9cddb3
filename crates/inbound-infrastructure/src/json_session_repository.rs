//! JSON file implementation of [`SessionRepository`].

use crate::storage::{AtomicFile, AtomicFileError};
use async_trait::async_trait;
use inbound_core::Result;
use inbound_core::session::{Session, SessionRepository};
use std::path::{Path, PathBuf};

/// Stores the session slot in a single `session.json`.
///
/// An unreadable file is logged, deleted and reported as "no session", so a
/// corrupt file never blocks startup.
pub struct JsonSessionRepository {
    file: AtomicFile<Session>,
}

impl JsonSessionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::json(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl SessionRepository for JsonSessionRepository {
    async fn load(&self) -> Result<Option<Session>> {
        match self.file.load() {
            Ok(Some(session)) => {
                tracing::info!(
                    "[SessionRepository] Restored session with {} leads",
                    session.leads.len()
                );
                Ok(Some(session))
            }
            Ok(None) => Ok(None),
            Err(AtomicFileError::FormatError { message, .. }) => {
                tracing::warn!(
                    "[SessionRepository] Discarding unreadable session file {}: {}",
                    self.file.path().display(),
                    message
                );
                self.file.remove()?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let stamped = session.clone().stamped();
        self.file.replace(&stamped)?;
        tracing::debug!(
            "[SessionRepository] Saved {} leads to {}",
            stamped.leads.len(),
            self.file.path().display()
        );
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.file.remove()?;
        tracing::info!("[SessionRepository] Session cleared");
        Ok(())
    }
}
