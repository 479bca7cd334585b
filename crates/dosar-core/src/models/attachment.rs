use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A document or image the user has added to the current case.
///
/// The payload lives in one of two representations. `Remote` holds an
/// opaque URI returned by the provider's file store after upload —
/// provider-held bytes, nothing local beyond the handle. `Inline` keeps
/// the raw bytes in session memory and ships them with every request.
/// Which representation gets constructed is a single deliberate policy
/// choice (see the CLI's upload mode), never a per-file accident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// User-visible filename. Unique within a case file.
    pub display_name: String,
    pub mime_type: String,
    pub data: AttachmentData,
}

/// Where the attachment's bytes live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttachmentData {
    Inline { bytes: Vec<u8> },
    Remote { uri: String },
}

/// The set of attachments for the current case ("dosar").
///
/// Display names are unique: registering a name that is already present
/// is rejected and leaves the set unchanged. Cleared on case reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseFile {
    attachments: Vec<Attachment>,
}

impl CaseFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attachment, rejecting duplicate display names.
    pub fn register(&mut self, attachment: Attachment) -> Result<(), CoreError> {
        if self.contains(&attachment.display_name) {
            return Err(CoreError::DuplicateAttachment(attachment.display_name));
        }
        self.attachments.push(attachment);
        Ok(())
    }

    /// Remove an attachment by display name. Returns whether it existed.
    pub fn remove(&mut self, display_name: &str) -> bool {
        let before = self.attachments.len();
        self.attachments.retain(|a| a.display_name != display_name);
        self.attachments.len() != before
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.attachments
            .iter()
            .any(|a| a.display_name == display_name)
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    /// Empty the case file. Clearing an already-empty case succeeds.
    pub fn clear(&mut self) {
        self.attachments.clear();
    }
}

/// Map a file extension to the MIME type the model API expects.
///
/// Returns `None` for extensions the case file does not accept.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}
