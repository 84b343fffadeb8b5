//! Gemini `generateContent` payload types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Gemini content container: one conversation turn, or the system instruction.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn turn(role: Role, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role),
            parts,
        }
    }
}

/// Untagged union of text and inline media content parts.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }
}

/// Base64 inline payload used for image/vision requests.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            max_output_tokens: 800,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

/// Top-level `generateContent` response envelope.
///
/// Every link in `candidates[0].content.parts[0].text` is optional so a
/// sparse response decodes instead of failing.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content::turn(
                Role::User,
                vec![
                    Part::text("What is this leaf?"),
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/jpeg".to_string(),
                            data: "QUJD".to_string(),
                        },
                    },
                ],
            )],
            system_instruction: Content {
                role: None,
                parts: vec![Part::text("persona")],
            },
            generation_config: GenerationConfig::default(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"text": "What is this leaf?"},
                        {"inlineData": {"mimeType": "image/jpeg", "data": "QUJD"}}
                    ]
                }],
                "system_instruction": {"parts": [{"text": "persona"}]},
                "generationConfig": {"temperature": 0.4, "maxOutputTokens": 800}
            })
        );
    }

    #[test]
    fn test_first_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "Oak"}, {"text": "ignored"}]}}]
        }))
        .unwrap();
        assert_eq!(response.first_text(), Some("Oak"));
    }

    #[test]
    fn test_sparse_responses_have_no_text() {
        for body in [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": [{}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"content": {"parts": [{"inlineData": {}}]}}]}),
        ] {
            let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
            assert_eq!(response.first_text(), None);
        }
    }
}
