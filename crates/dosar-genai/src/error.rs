use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("missing or malformed API credential: {0}")]
    Config(String),

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("request timed out")]
    Timeout,

    #[error("response blocked by content safety: {0}")]
    SafetyBlocked(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("file upload failed: {name}: {reason}")]
    UploadFailed { name: String, reason: String },

    #[error("file processing did not finish within {attempts} poll attempts")]
    UploadTimeout { attempts: u32 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(String),
}

impl GenAiError {
    /// Map a reqwest failure, keeping timeouts distinguishable from
    /// other transport errors.
    pub(crate) fn transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenAiError::Timeout
        } else {
            GenAiError::Transport(e.to_string())
        }
    }
}
