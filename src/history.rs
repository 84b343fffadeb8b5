//! Conversion of caller-supplied history into Gemini turns.

use crate::ai::gemini::{Content, InlineData, Part, Role};
use crate::models::HistoryEntry;
use crate::{Error, Result};

/// Map a caller role onto the upstream role. Only `assistant` becomes `model`.
pub fn upstream_role(role: &str) -> Role {
    if role == "assistant" {
        Role::Model
    } else {
        Role::User
    }
}

/// Parse a `data:<mime>;base64,<payload>` URL into an inline-data part.
///
/// The MIME type is whatever sits between `:` and `;` in the metadata segment,
/// possibly empty. The payload is relayed without decoding.
pub fn parse_data_url(image_data: &str) -> Result<InlineData> {
    let (meta, payload) = image_data.split_once(',').ok_or_else(|| {
        Error::InvalidRequest("imageData must be a data URL (data:<mime>;base64,<data>)".into())
    })?;

    let start = meta.find(':').map_or(0, |colon| colon + 1);
    let end = meta.find(';').unwrap_or(meta.len());
    let mime_type = meta.get(start..end).unwrap_or_default();

    Ok(InlineData {
        mime_type: mime_type.to_string(),
        data: payload.to_string(),
    })
}

/// Build the newest user turn from the current message and optional image.
///
/// Both inputs may be absent, in which case the turn has no parts.
pub fn current_turn(message: Option<&str>, image_data: Option<&str>) -> Result<Content> {
    let mut parts = Vec::with_capacity(2);

    if let Some(message) = message.filter(|m| !m.is_empty()) {
        parts.push(Part::text(message));
    }

    if let Some(image_data) = image_data.filter(|i| !i.is_empty()) {
        parts.push(Part::InlineData {
            inline_data: parse_data_url(image_data)?,
        });
    }

    Ok(Content::turn(Role::User, parts))
}

/// Map history in order, then append exactly one turn for the current message.
pub fn build_contents(
    history: &[HistoryEntry],
    message: Option<&str>,
    image_data: Option<&str>,
) -> Result<Vec<Content>> {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|entry| {
            Content::turn(
                upstream_role(&entry.role),
                vec![Part::text(entry.content.clone())],
            )
        })
        .collect();

    contents.push(current_turn(message, image_data)?);
    Ok(contents)
}
