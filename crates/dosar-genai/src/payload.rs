//! Request payload types and assembly for `generateContent`.
//!
//! The assembler turns (prior transcript, current attachments, current
//! user text) into the ordered content blocks the API expects. History
//! blocks carry cleaned text — the store persists raw assistant output
//! and every read path cleans it.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use dosar_core::models::{Attachment, AttachmentData, ChatMessage, ChatRole};
use dosar_core::postprocess;

/// Provider role label for user turns.
pub const USER_ROLE: &str = "user";
/// Provider role label for assistant turns.
pub const MODEL_ROLE: &str = "model";

/// Synthetic instruction appended after the file parts, directing the
/// model at the just-attached documents. Emitted only when the case
/// file is non-empty.
pub const ANALYZE_ATTACHMENTS_NOTE: &str = "\n\n[Analizează documentele de mai sus]";

/// One role-tagged content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

/// One part of a content block: text, inline bytes, or a file reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    File {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

/// Base64-encoded inline bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

/// Reference to provider-held file bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub mime_type: String,
    pub file_uri: String,
}

/// The complete generation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: SystemInstruction,
    pub tools: Vec<Tool>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

/// Tool list entry. Only search grounding is used.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub google_search: GoogleSearch,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
}

/// Low temperature for factual consistency.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Build the ordered content blocks for one generation turn.
///
/// `history` is the transcript **prior to** the current user turn; the
/// caller durably appends the user turn before issuing the request
/// (append-then-assemble). The current block carries, in order: one
/// part per attachment, the synthetic analysis note when any attachment
/// is present, then the raw user text.
pub fn assemble_contents(
    history: &[ChatMessage],
    attachments: &[Attachment],
    user_input: &str,
) -> Vec<Content> {
    let mut contents = Vec::with_capacity(history.len() + 1);

    for msg in history {
        let role = match msg.role {
            ChatRole::User => USER_ROLE,
            ChatRole::Assistant => MODEL_ROLE,
        };
        contents.push(Content {
            role: role.to_string(),
            parts: vec![Part::Text {
                text: postprocess::clean(&msg.content),
            }],
        });
    }

    let mut parts: Vec<Part> = attachments.iter().map(part_for).collect();
    if !attachments.is_empty() {
        parts.push(Part::Text {
            text: ANALYZE_ATTACHMENTS_NOTE.to_string(),
        });
    }
    parts.push(Part::Text {
        text: user_input.to_string(),
    });

    contents.push(Content {
        role: USER_ROLE.to_string(),
        parts,
    });

    contents
}

/// The single accessor mapping an attachment to its part type: inline
/// bytes become `inlineData`, remote handles become `fileData`.
pub fn part_for(attachment: &Attachment) -> Part {
    match &attachment.data {
        AttachmentData::Inline { bytes } => Part::Inline {
            inline_data: Blob {
                mime_type: attachment.mime_type.clone(),
                data: BASE64.encode(bytes),
            },
        },
        AttachmentData::Remote { uri } => Part::File {
            file_data: FileData {
                mime_type: attachment.mime_type.clone(),
                file_uri: uri.clone(),
            },
        },
    }
}

/// Wrap assembled blocks into the complete request: fixed system
/// instruction, search grounding enabled, low sampling temperature.
pub fn build_request(contents: Vec<Content>, system_prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents,
        system_instruction: SystemInstruction {
            parts: vec![Part::Text {
                text: system_prompt.to_string(),
            }],
        },
        tools: vec![Tool {
            google_search: GoogleSearch::default(),
        }],
        generation_config: GenerationConfig {
            temperature: DEFAULT_TEMPERATURE,
        },
    }
}
