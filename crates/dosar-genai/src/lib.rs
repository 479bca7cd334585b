//! dosar-genai
//!
//! Client for the Google Generative Language API: payload assembly,
//! streamed generation with search grounding, and the file-store side
//! channel used for case attachments.

pub mod client;
pub mod error;
pub mod files;
pub mod payload;
pub mod stream;

pub use client::GenAiClient;
pub use error::GenAiError;
