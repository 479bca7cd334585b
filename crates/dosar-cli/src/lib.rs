//! dosar-cli library root.
//!
//! Re-exports internal modules so integration tests can exercise the
//! turn controller and command layer directly, without going through
//! the interactive shell.

pub mod chat;
pub mod commands;
pub mod config;
pub mod session;
