//! dosar-storage
//!
//! Durable transcript persistence. Thin wrapper around SQLite.

pub mod error;
pub mod transcript;

pub use error::StorageError;
pub use transcript::TranscriptStore;
