//! Provider file store: upload and processing-state polling.
//!
//! Large attachments are uploaded to the API's file side channel and
//! referenced by URI instead of shipping bytes with every request. An
//! uploaded file starts in `PROCESSING` and must reach `ACTIVE` before
//! it can appear in a payload; polling is bounded — a terminal `FAILED`
//! state or an exhausted attempt budget surfaces as an error instead of
//! looping forever.

use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::client::GenAiClient;
use crate::error::GenAiError;

/// Fixed interval between processing-state polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Attempt budget for one file. At one poll per second this bounds the
/// wait at a minute.
pub const MAX_POLL_ATTEMPTS: u32 = 60;

/// Handle to provider-held file bytes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    /// Opaque resource name, e.g. `files/abc123`.
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub mime_type: String,
    /// Dereferenceable URI once the file is `ACTIVE`.
    pub uri: String,
    pub state: FileState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    Processing,
    Active,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: RemoteFile,
}

/// Upload bytes to the file store.
///
/// Uses the resumable protocol: a start request carrying the metadata,
/// then one upload+finalize request to the session URL the start
/// response names. The returned handle is usually still `PROCESSING`;
/// follow with [`wait_until_active`].
pub async fn upload(
    client: &GenAiClient,
    bytes: Vec<u8>,
    display_name: &str,
    mime_type: &str,
) -> Result<RemoteFile, GenAiError> {
    let start_url = format!("{}/upload/v1beta/files", client.base_url());
    let metadata = serde_json::json!({ "file": { "display_name": display_name } });

    let response = client
        .http()
        .post(&start_url)
        .query(&[("key", client.key())])
        .header("X-Goog-Upload-Protocol", "resumable")
        .header("X-Goog-Upload-Command", "start")
        .header("X-Goog-Upload-Header-Content-Length", bytes.len())
        .header("X-Goog-Upload-Header-Content-Type", mime_type)
        .json(&metadata)
        .send()
        .await
        .map_err(GenAiError::transport)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GenAiError::UploadFailed {
            name: display_name.to_string(),
            reason: format!("{status}: {body}"),
        });
    }

    let upload_url = response
        .headers()
        .get("x-goog-upload-url")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| GenAiError::ResponseParse("missing x-goog-upload-url header".to_string()))?
        .to_string();

    let size = bytes.len();
    let response = client
        .http()
        .post(&upload_url)
        .header("X-Goog-Upload-Offset", "0")
        .header("X-Goog-Upload-Command", "upload, finalize")
        .body(bytes)
        .send()
        .await
        .map_err(GenAiError::transport)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GenAiError::UploadFailed {
            name: display_name.to_string(),
            reason: format!("{status}: {body}"),
        });
    }

    let uploaded: UploadResponse = response
        .json()
        .await
        .map_err(|e| GenAiError::ResponseParse(e.to_string()))?;

    info!(
        display_name,
        size,
        name = %uploaded.file.name,
        "file uploaded"
    );

    Ok(uploaded.file)
}

/// Fetch the current state of an uploaded file.
pub async fn get(client: &GenAiClient, name: &str) -> Result<RemoteFile, GenAiError> {
    let url = format!("{}/v1beta/{name}", client.base_url());
    let response = client
        .http()
        .get(&url)
        .query(&[("key", client.key())])
        .send()
        .await
        .map_err(GenAiError::transport)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GenAiError::Invocation(format!("{status}: {body}")));
    }

    response
        .json()
        .await
        .map_err(|e| GenAiError::ResponseParse(e.to_string()))
}

/// Poll an uploaded file until it leaves `PROCESSING`.
///
/// Bounded: [`MAX_POLL_ATTEMPTS`] polls at [`POLL_INTERVAL`]. A
/// terminal `FAILED` state maps to `UploadFailed`; an exhausted budget
/// maps to `UploadTimeout`. Matters for large PDFs, which the provider
/// indexes before they become referenceable.
pub async fn wait_until_active(
    client: &GenAiClient,
    mut file: RemoteFile,
) -> Result<RemoteFile, GenAiError> {
    for _ in 0..MAX_POLL_ATTEMPTS {
        match file.state {
            FileState::Active => return Ok(file),
            FileState::Failed => {
                return Err(GenAiError::UploadFailed {
                    name: display_name_or_resource(&file),
                    reason: "provider reported processing failure".to_string(),
                });
            }
            FileState::Processing | FileState::Unknown => {
                tokio::time::sleep(POLL_INTERVAL).await;
                file = get(client, &file.name).await?;
            }
        }
    }

    Err(GenAiError::UploadTimeout {
        attempts: MAX_POLL_ATTEMPTS,
    })
}

fn display_name_or_resource(file: &RemoteFile) -> String {
    if file.display_name.is_empty() {
        file.name.clone()
    } else {
        file.display_name.clone()
    }
}
