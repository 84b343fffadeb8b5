use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::ai::ContentGenerator;
use crate::config::{Config, DEFAULT_BASE_URL};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Lightweight Gemini REST client for the `generateContent` endpoint.
pub struct GeminiHttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl GeminiHttpClient {
    pub fn new(timeout: Duration) -> Self {
        Self::new_with_client(timeout, Client::new())
    }

    pub fn new_with_client(timeout: Duration, client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.timeout).with_base_url(config.base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl ContentGenerator for GeminiHttpClient {
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model);
        tracing::debug!("Sending generateContent request to {}", url);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors embed the URL, which carries the key.
                let e = e.without_url();
                tracing::error!("Failed to send request to Gemini: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.map_err(reqwest::Error::without_url)?;
            tracing::error!("Gemini API error (status {}): {}", status, body);
            return Err(Error::Upstream { status, body });
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            Error::Serialization(e)
        })
    }
}
