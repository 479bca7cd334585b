//! Application configuration.
//!
//! A versioned JSON file under the user's config directory. Writes are
//! atomic (temp file + rename) with owner-only permissions on Unix.
//! The API key is resolved from `GOOGLE_API_KEY` first, then from the
//! config file; a missing key is fatal to the session and surfaced
//! before any request is attempted.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use dosar_genai::client::DEFAULT_MODEL;

/// Current config version. Bump this when adding fields or changing
/// shape; each bump requires a matching entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Environment variable consulted before the config file.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory available on this system")]
    NoConfigDir,

    #[error("no data directory available on this system")]
    NoDataDir,

    #[error("missing API key: set {API_KEY_ENV} or add api_key to {0}")]
    MissingApiKey(String),

    #[error("config_version {found} is newer than this build supports ({supported})")]
    VersionTooNew { found: u32, supported: u32 },

    #[error("config is not a JSON object")]
    NotAnObject,

    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DosarConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Chat model id.
    pub model: String,
    /// Language code for spoken answers.
    pub language: String,
    /// How attachments are represented in requests. One deliberate
    /// policy for the whole case, never a per-file accident.
    pub upload_mode: UploadMode,
    /// API key fallback when the environment variable is unset.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub api_key: Option<String>,
    pub created_at: jiff::Timestamp,
}

impl Default for DosarConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            model: DEFAULT_MODEL.to_string(),
            language: dosar_speech::DEFAULT_LANGUAGE.to_string(),
            upload_mode: UploadMode::Remote,
            api_key: None,
            created_at: jiff::Timestamp::now(),
        }
    }
}

/// Attachment representation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadMode {
    /// Upload to the provider file store; requests carry URIs.
    Remote,
    /// Keep bytes in session memory; requests carry inline data.
    Inline,
}

pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("dosar"))
}

fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.json"))
}

/// Directory for the transcript database and synthesized audio.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
    let dir = base.join("dosar");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn default_db_path() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("transcript.db"))
}

/// Load the config, or fall back to defaults when no file exists yet.
pub fn load_or_default() -> Result<DosarConfig, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(DosarConfig::default());
    }

    let contents = std::fs::read_to_string(&path)?;

    // Parse as raw JSON so migrations can run before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: DosarConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to
/// [`CURRENT_VERSION`]. Each migration is a pure transform on the raw
/// JSON value.
fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, ConfigError> {
    if from_version > CURRENT_VERSION {
        return Err(ConfigError::VersionTooNew {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: add the upload_mode policy knob (remote, the previous
    // implicit behavior).
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(ConfigError::NotAnObject)?;
        obj.entry("upload_mode")
            .or_insert(serde_json::Value::String("remote".to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added upload_mode)");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

pub fn save(config: &DosarConfig) -> Result<(), ConfigError> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity.
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Resolve the API key: environment first, then the config file.
pub fn resolve_api_key(config: &DosarConfig) -> Result<String, ConfigError> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Ok(key);
        }
    }
    if let Some(key) = &config.api_key {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Ok(key);
        }
    }
    let path = config_path()?;
    Err(ConfigError::MissingApiKey(path.display().to_string()))
}
