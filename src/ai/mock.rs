use super::gemini::{GenerateContentRequest, GenerateContentResponse};
use super::ContentGenerator;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-process stand-in for the Gemini client.
///
/// Replies cycle through the configured responses; with none configured it
/// answers with a single-candidate response. Every call is recorded.
pub struct MockContentGenerator {
    responses: Arc<Mutex<Vec<serde_json::Value>>>,
    failure: Option<(u16, String)>,
    requests: Arc<Mutex<Vec<GenerateContentRequest>>>,
    api_keys: Arc<Mutex<Vec<String>>>,
}

impl MockContentGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            requests: Arc::new(Mutex::new(Vec::new())),
            api_keys: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a raw upstream JSON body.
    pub fn with_response(self, response: serde_json::Value) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Queue a body whose first candidate carries `text`.
    pub fn with_text_response(self, text: &str) -> Self {
        self.with_response(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        }))
    }

    /// Make every call fail as a non-success upstream status would.
    pub fn with_failure(mut self, status: u16, body: &str) -> Self {
        self.failure = Some((status, body.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<GenerateContentRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn last_api_key(&self) -> Option<String> {
        self.api_keys.lock().unwrap().last().cloned()
    }
}

impl Default for MockContentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn generate_content(
        &self,
        api_key: &str,
        _model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        self.api_keys.lock().unwrap().push(api_key.to_string());

        if let Some((status, body)) = &self.failure {
            let status = axum::http::StatusCode::from_u16(*status)
                .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
            return Err(Error::Upstream {
                status,
                body: body.clone(),
            });
        }

        let responses = self.responses.lock().unwrap();
        let body = if responses.is_empty() {
            serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "Mock forestry answer"}]}}]
            })
        } else {
            responses[(call - 1) % responses.len()].clone()
        };

        Ok(serde_json::from_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::{Content, GenerationConfig, Part, Role};

    fn request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::turn(Role::User, vec![Part::text("hi")])],
            system_instruction: Content {
                role: None,
                parts: vec![],
            },
            generation_config: GenerationConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_default_response() {
        let mock = MockContentGenerator::new();
        let response = mock.generate_content("k", "m", &request()).await.unwrap();
        assert_eq!(response.first_text(), Some("Mock forestry answer"));
    }

    #[tokio::test]
    async fn test_custom_responses_cycle() {
        let mock = MockContentGenerator::new()
            .with_text_response("first")
            .with_text_response("second");

        let r1 = mock.generate_content("k", "m", &request()).await.unwrap();
        let r2 = mock.generate_content("k", "m", &request()).await.unwrap();
        let r3 = mock.generate_content("k", "m", &request()).await.unwrap();

        assert_eq!(r1.first_text(), Some("first"));
        assert_eq!(r2.first_text(), Some("second"));
        assert_eq!(r3.first_text(), Some("first"));
    }

    #[tokio::test]
    async fn test_records_calls() {
        let mock = MockContentGenerator::new();
        assert_eq!(mock.get_call_count(), 0);
        assert!(mock.last_request().is_none());

        mock.generate_content("secret", "m", &request()).await.unwrap();

        assert_eq!(mock.get_call_count(), 1);
        assert_eq!(mock.last_api_key().as_deref(), Some("secret"));
        assert_eq!(mock.last_request().unwrap(), request());
    }

    #[tokio::test]
    async fn test_failure() {
        let mock = MockContentGenerator::new().with_failure(503, "down");
        let err = mock.generate_content("k", "m", &request()).await.unwrap_err();
        assert!(matches!(err, Error::Upstream { .. }));
        assert_eq!(mock.get_call_count(), 1);
    }
}
