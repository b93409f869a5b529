//! Client implementation for the Gemini extraction boundary
//!
//! This is the entry point for issuing `generateContent` requests: a
//! role-tagged instruction pair (system instruction plus user content)
//! and an optional generation configuration.

use crate::error::{Error, Result};
use crate::gemini::http::HttpClient;
use crate::gemini::types::{Content, GenerateContentResponse, GenerationConfig};
use serde::Serialize;
use tracing::debug;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Request for generating content
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    /// The contents to generate from
    contents: Vec<Content>,

    /// Generation configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,

    /// The system prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

/// Client for the Gemini API
#[derive(Clone)]
pub struct Client {
    http_client: HttpClient,
}

impl Client {
    /// Create a new client with an API key for the Gemini Developer API
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::with_api_key(api_key.into()),
        }
    }

    /// Create a new client from the `GEMINI_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| Error::Auth(format!("{} environment variable must be set", API_KEY_ENV)))?;
        Ok(Self::with_api_key(api_key))
    }

    /// Generate content from a model
    ///
    /// # Arguments
    ///
    /// * `model` - The model identifier
    /// * `system_instruction` - Optional system prompt
    /// * `contents` - The role-tagged contents
    /// * `config` - Optional generation configuration
    pub async fn generate_content(
        &self,
        model: &str,
        system_instruction: Option<Content>,
        contents: Vec<Content>,
        config: Option<GenerationConfig>,
    ) -> Result<GenerateContentResponse> {
        let request = GenerateContentRequest {
            contents,
            generation_config: config,
            system_instruction,
        };

        let path = format!("models/{}:generateContent", model);

        debug!("Generating content from model {}", model);
        self.http_client.post(&path, &request).await
    }
}

#[cfg(test)]
impl Client {
    /// Point the client at a test server (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.http_client.set_base_url(url);
    }
}
