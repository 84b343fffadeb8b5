//! Request pipeline: normalize, build prompt, map history, call upstream,
//! extract the reply.

use crate::ai::gemini::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::ai::ContentGenerator;
use crate::config::Config;
use crate::models::{ChatRequest, ChatResponse};
use crate::{history, prompts, Result};
use std::sync::Arc;
use tracing::{info, Instrument};
use uuid::Uuid;

pub const NO_RESPONSE: &str = "No response generated.";

/// Assemble the upstream payload for a chat request.
pub fn build_upstream_request(request: &ChatRequest) -> Result<GenerateContentRequest> {
    let instruction = prompts::build_system_instruction(
        request.context.as_deref(),
        request.species_data.as_ref(),
    );

    let contents = history::build_contents(
        &request.conversation_history,
        request.message.as_deref(),
        request.image_data.as_deref(),
    )?;

    Ok(GenerateContentRequest {
        contents,
        system_instruction: Content {
            role: None,
            parts: vec![Part::text(instruction)],
        },
        generation_config: GenerationConfig::default(),
    })
}

/// Reply text from an upstream response, or [`NO_RESPONSE`].
pub fn extract_reply(response: &GenerateContentResponse) -> String {
    response
        .first_text()
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_RESPONSE)
        .to_string()
}

/// Run one chat request end to end.
///
/// The credential is checked before anything else, so a misconfigured relay
/// never reaches the network.
pub async fn handle_chat_request(
    request: &ChatRequest,
    config: &Config,
    upstream: &dyn ContentGenerator,
) -> Result<ChatResponse> {
    let api_key = config.api_key()?;
    let payload = build_upstream_request(request)?;

    let response = upstream
        .generate_content(api_key, &config.model, &payload)
        .await?;

    Ok(ChatResponse {
        response: extract_reply(&response),
    })
}

/// Shared relay state handed to every hosting entry point.
#[derive(Clone)]
pub struct ChatRelay {
    config: Arc<Config>,
    upstream: Arc<dyn ContentGenerator>,
}

impl ChatRelay {
    pub fn new(config: Config, upstream: Arc<dyn ContentGenerator>) -> Self {
        Self {
            config: Arc::new(config),
            upstream,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn handle(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("chat_request", %request_id);

        async {
            info!(
                history = request.conversation_history.len(),
                has_image = request.image_data.is_some(),
                has_species_data = request.species_data.is_some(),
                "Relaying chat request"
            );

            let result = handle_chat_request(request, &self.config, self.upstream.as_ref()).await;
            match &result {
                Ok(response) => info!(chars = response.response.len(), "Chat request completed"),
                Err(e) => tracing::error!("Chat request failed: {}", e),
            }
            result
        }
        .instrument(span)
        .await
    }
}
