//! Session repository trait.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// Storage for the single session slot.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the stored session.
    ///
    /// - `Ok(Some(session))`: a session was stored
    /// - `Ok(None)`: nothing stored, or the stored data was unreadable
    async fn load(&self) -> Result<Option<Session>>;

    /// Overwrites the slot with `session`.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes the stored session. Succeeds when nothing was stored.
    async fn clear(&self) -> Result<()>;
}
