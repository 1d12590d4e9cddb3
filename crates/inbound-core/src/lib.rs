pub mod backend;
pub mod config;
pub mod docs;
pub mod error;
pub mod lead;
pub mod parser;
pub mod projection;
pub mod prompt;
pub mod query;
pub mod session;
pub mod state;

// Re-export common types
pub use error::{InboundError, Result};
pub use lead::{Contact, InstagramPost, Lead, NewsArticle};
pub use query::{SearchPlatform, SearchQuery};
pub use state::AppState;
