use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("attachment already in case file: {0}")]
    DuplicateAttachment(String),

    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid session id: {0}")]
    InvalidSessionId(#[from] uuid::Error),
}
