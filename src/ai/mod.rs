//! Upstream generative-language integration
//!
//! The relay talks to the model through [`ContentGenerator`] so tests can
//! swap the Gemini REST client for an in-process mock.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiHttpClient;
pub use mock::MockContentGenerator;

use crate::Result;
use async_trait::async_trait;
use gemini::{GenerateContentRequest, GenerateContentResponse};

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Issue one `generateContent` call for `model`, authenticated with `api_key`.
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}
