//! HTTP client for the Gemini extraction boundary
//!
//! Handles authentication, request formatting and response parsing for
//! the Gemini Developer API.

use crate::error::{Error, Result};
use reqwest::{Client as ReqwestClient, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default API version
const DEFAULT_API_VERSION: &str = "v1beta";

/// HTTP client for the Gemini Developer API
///
/// Authenticates with an API key passed as a query parameter.
#[derive(Clone)]
pub struct HttpClient {
    /// The underlying reqwest client
    client: ReqwestClient,

    /// Base URL for API requests
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// API version
    api_version: String,
}

#[cfg(test)]
impl HttpClient {
    /// Set the base URL (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }
}

impl HttpClient {
    /// Create a new HTTP client with an API key
    pub fn with_api_key(api_key: String) -> Self {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Build a URL for an API path
    fn build_url(&self, path: &str) -> Result<Url> {
        let url = format!("{}/{}/{}", self.base_url, self.api_version, path);
        Url::parse(&url).map_err(|e| Error::Other(format!("Invalid URL: {}", e)))
    }

    /// Send a POST request with a JSON body and parse the JSON response
    pub async fn post<T: DeserializeOwned, B: Serialize + std::fmt::Debug>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path)?;
        let request = self
            .client
            .post(url)
            .json(body)
            .query(&[("key", &self.api_key)]);

        debug!("Sending POST request to {}", path);
        self.execute_request(request).await
    }

    /// Execute a request and parse the response
    async fn execute_request<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let parsed = response.json::<T>().await?;
            Ok(parsed)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<no response body>".to_string());
            error!("API request failed with status {}: {}", status, message);
            Err(Error::Api {
                status_code: status.as_u16(),
                message,
            })
        }
    }
}
