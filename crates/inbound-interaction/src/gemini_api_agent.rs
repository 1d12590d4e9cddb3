//! GeminiApiAgent - Gemini REST backend for lead generation.
//!
//! Sends the prompt pair to `models/{model}:generateContent`, optionally with
//! Google Search grounding, and returns the concatenated candidate text.

use async_trait::async_trait;
use inbound_core::backend::LeadBackend;
use inbound_core::config::AppConfig;
use inbound_core::prompt::PromptPair;
use inbound_core::{InboundError, Result};
use inbound_infrastructure::SecretStorage;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// [`LeadBackend`] that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    grounding: bool,
}

impl GeminiApiAgent {
    /// Creates an agent with grounding enabled and no request timeout.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            grounding: true,
        }
    }

    /// Builds an agent from `secret.json` (or `GEMINI_API_KEY`) and `config.toml`.
    ///
    /// A `model_name` in the secret file overrides the configured model.
    pub fn from_config(secrets: &SecretStorage, config: &AppConfig) -> Result<Self> {
        let gemini = secrets.gemini()?;
        let model = gemini
            .model_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| config.model.clone());

        let agent = Self::new(gemini.api_key, model).with_grounding(config.grounding);
        match config.request_timeout_secs {
            Some(secs) => agent.with_timeout(Duration::from_secs(secs)),
            None => Ok(agent),
        }
    }

    pub fn with_grounding(mut self, grounding: bool) -> Self {
        self.grounding = grounding;
        self
    }

    /// Applies a transport timeout to every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| InboundError::backend(None, format!("Failed to build HTTP client: {err}")))?;
        Ok(self)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                // reqwest errors can embed the URL, which carries the key.
                let err = err.without_url();
                InboundError::backend(None, format!("Gemini API request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            InboundError::backend(None, format!("Failed to parse Gemini response: {}", err.without_url()))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl LeadBackend for GeminiApiAgent {
    async fn generate(&self, prompt: &PromptPair) -> Result<String> {
        let request = build_request(prompt, self.grounding);
        tracing::info!(
            "[GeminiApiAgent] generateContent model={} grounding={} prompt_chars={}",
            self.model,
            self.grounding,
            prompt.task_instruction.len()
        );

        let text = self.send_request(&request).await?;
        tracing::debug!("[GeminiApiAgent] Received {} chars", text.len());
        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

fn build_request(prompt: &PromptPair, grounding: bool) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: prompt.task_instruction.clone(),
            }],
        }],
        system_instruction: Some(Content {
            role: None,
            parts: vec![Part {
                text: prompt.system_instruction.clone(),
            }],
        }),
        tools: grounding.then(|| vec![Tool {
            google_search: GoogleSearch {},
        }]),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

/// Joins the text of every part of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(InboundError::backend(
            None,
            format!("Gemini API blocked the request: {reason}"),
        ));
    }

    let candidate = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next());
    let finish_reason = candidate.as_ref().and_then(|c| c.finish_reason.clone());

    let text: String = candidate
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let detail = finish_reason
            .map(|reason| format!(" (finish reason: {reason})"))
            .unwrap_or_default();
        return Err(InboundError::backend(
            None,
            format!("Gemini API returned no text in the response candidates{detail}"),
        ));
    }
    Ok(text)
}

/// Turns a non-2xx reply into a backend error, preferring `STATUS: message`
/// from the service's error body.
fn map_http_error(status: StatusCode, body: &str) -> InboundError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                format!("Gemini API returned HTTP {status}")
            } else {
                body.to_string()
            }
        });

    InboundError::backend(Some(status.as_u16()), message)
}
