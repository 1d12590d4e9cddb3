//! Generative backend trait.

use crate::error::Result;
use crate::prompt::PromptPair;
use async_trait::async_trait;

/// A text-generation service that answers a prompt pair with raw text.
///
/// Implementations map transport and service failures to
/// [`InboundError::Backend`](crate::error::InboundError::Backend). Parsing the
/// text is left to the caller.
#[async_trait]
pub trait LeadBackend: Send + Sync {
    async fn generate(&self, prompt: &PromptPair) -> Result<String>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "backend"
    }
}
