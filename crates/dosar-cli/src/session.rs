//! Session identity and the per-interaction context.
//!
//! The session id is the case's address: the `--session` flag wins,
//! then the stored last-session marker, then a fresh id. Whatever is
//! resolved gets written back, so a bare relaunch reattaches to the
//! same case.

use dosar_core::models::{CaseFile, SessionId};
use dosar_storage::TranscriptStore;

use crate::config::{self, ConfigError};

/// Everything one interaction needs, passed explicitly — no ambient
/// session globals.
pub struct CaseSession {
    pub id: SessionId,
    pub store: TranscriptStore,
    pub case: CaseFile,
    pub audio_enabled: bool,
}

impl CaseSession {
    pub fn new(id: SessionId, store: TranscriptStore) -> Self {
        Self {
            id,
            store,
            case: CaseFile::new(),
            audio_enabled: false,
        }
    }
}

/// Resolve and persist the session id for this launch.
pub fn resolve_session_id(flag: Option<SessionId>) -> Result<SessionId, ConfigError> {
    let dir = config::config_dir()?;
    std::fs::create_dir_all(&dir)?;
    let marker = dir.join("last_session");

    let id = match flag {
        Some(id) => id,
        None => match std::fs::read_to_string(&marker) {
            Ok(contents) => match contents.trim().parse::<SessionId>() {
                Ok(id) => id,
                Err(_) => SessionId::new(),
            },
            Err(_) => SessionId::new(),
        },
    };

    std::fs::write(&marker, id.to_string())?;
    Ok(id)
}
