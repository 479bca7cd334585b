//! dosar-core
//!
//! Pure domain types and response cleanup. No network or storage
//! dependency — this is the shared vocabulary of the dosar system.

pub mod error;
pub mod models;
pub mod postprocess;
