//! Application and secret configuration models.

use crate::error::{InboundError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Settings stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gemini model id, unless `secret.json` sets `model_name`.
    pub model: String,
    /// Attach the search grounding tool to each request.
    pub grounding: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// Drop returned companies that match the exclusion list.
    pub filter_exclusions: bool,
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            grounding: true,
            request_timeout_secs: None,
            filter_exclusions: true,
            export_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    pub const KEYS: [&'static str; 5] = [
        "model",
        "grounding",
        "request_timeout_secs",
        "filter_exclusions",
        "export_dir",
    ];

    /// Updates one setting from its textual form.
    ///
    /// `request_timeout_secs` accepts `none` (or an empty value) to unset it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "model" => {
                if value.is_empty() {
                    return Err(InboundError::config("model must not be empty"));
                }
                self.model = value.to_string();
            }
            "grounding" => self.grounding = parse_bool(key, value)?,
            "filter_exclusions" => self.filter_exclusions = parse_bool(key, value)?,
            "request_timeout_secs" => {
                self.request_timeout_secs = match value {
                    "" | "none" => None,
                    secs => Some(secs.parse().map_err(|_| {
                        InboundError::config(format!(
                            "request_timeout_secs must be a whole number of seconds, got '{secs}'"
                        ))
                    })?),
                };
            }
            "export_dir" => self.export_dir = PathBuf::from(value),
            other => {
                return Err(InboundError::config(format!(
                    "unknown config key '{other}' (expected one of: {})",
                    Self::KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(InboundError::config(format!(
            "{key} must be true or false, got '{value}'"
        ))),
    }
}

/// Contents of `secret.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
}

/// Gemini API credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}
