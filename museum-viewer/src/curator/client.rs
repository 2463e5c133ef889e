use crate::curator::prompt::SYSTEM_INSTRUCTION;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CuratorError {
    #[error("no API credential configured")]
    MissingCredential,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service answered with HTTP {0}")]
    Status(u16),
    #[error("service returned no text")]
    EmptyAnswer,
    #[error("curator queue is full")]
    Busy,
}

impl From<reqwest::Error> for CuratorError {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Transport(error.to_string()),
        }
    }
}

/// Text-generation service settings. The credential is the only environment
/// configuration the viewer reads.
#[derive(Debug, Clone)]
pub struct CuratorSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
}

impl CuratorSettings {
    /// `API_KEY` baked in at build time, overridden at runtime on native builds.
    pub fn from_env() -> Self {
        let compiled = option_env!("API_KEY").map(str::to_string);

        #[cfg(not(target_arch = "wasm32"))]
        let api_key = std::env::var("API_KEY").ok().or(compiled);

        #[cfg(target_arch = "wasm32")]
        let api_key = compiled;

        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn offline() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    pub fn into_text(self) -> Result<String, CuratorError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            Err(CuratorError::EmptyAnswer)
        } else {
            Ok(text.to_string())
        }
    }
}

/// Thin client for the generative-language `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GenerativeClient {
    settings: CuratorSettings,
}

impl GenerativeClient {
    pub fn new(settings: CuratorSettings) -> Self {
        Self { settings }
    }

    pub fn is_configured(&self) -> bool {
        self.settings.api_key.is_some()
    }

    pub fn request_body(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(SYSTEM_INSTRUCTION.to_string()),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }

    fn url(&self) -> Result<String, CuratorError> {
        let key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(CuratorError::MissingCredential)?;
        Ok(format!(
            "{}/{}:generateContent?key={}",
            self.settings.endpoint, self.settings.model, key
        ))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn generate(&self, prompt: &str) -> Result<String, CuratorError> {
        let url = self.url()?;
        let response = reqwest::blocking::Client::new()
            .post(url)
            .json(&Self::request_body(prompt))
            .send()?
            .error_for_status()?;
        response.json::<GenerateResponse>()?.into_text()
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn generate(&self, prompt: &str) -> Result<String, CuratorError> {
        let url = self.url()?;
        let response = reqwest::Client::new()
            .post(url)
            .json(&Self::request_body(prompt))
            .send()
            .await?
            .error_for_status()?;
        response.json::<GenerateResponse>().await?.into_text()
    }
}
