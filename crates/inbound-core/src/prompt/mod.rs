//! Prompt construction for the generative backend.
//!
//! Every request is a [`PromptPair`]: a fixed system instruction and a task
//! instruction assembled from the user's query. Both variants (a normal
//! search and a lookalike search seeded by one lead) demand the same output:
//! a bare JSON array of lead objects.

mod generation;
mod lookalike;
pub mod sections;

pub use generation::build_generation_prompt;
pub use lookalike::{LookalikeRequest, build_lookalike_prompt};

use serde::{Deserialize, Serialize};

/// Persona and output directive sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are a world-class lead generation expert and sales strategist. Your purpose is to identify international companies showing strong potential for expanding into the Indian market. For each company, you must perform deep analysis to score the lead's quality and provide a personalized outreach suggestion. You must follow all instructions precisely and return data ONLY in the specified JSON array format.";

/// The two strings handed to the backend for one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPair {
    pub system_instruction: String,
    pub task_instruction: String,
}

impl PromptPair {
    fn with_task(task_instruction: String) -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            task_instruction,
        }
    }
}

/// `in the "X" category` phrase, empty when no category was given.
fn category_phrase(category: &str) -> String {
    let category = category.trim();
    if category.is_empty() {
        String::new()
    } else {
        format!(" in the \"{category}\" category")
    }
}
