//! Streamed generation over `streamGenerateContent`.
//!
//! The API delivers the reply as server-sent events: one JSON chunk per
//! `data:` line, stream exhaustion marking the end of the turn.
//! Fragments are surfaced in exactly the order the provider emits them;
//! the caller owns accumulation and commit.

use std::collections::VecDeque;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use serde::Deserialize;
use tracing::debug;

use crate::client::GenAiClient;
use crate::error::GenAiError;
use crate::payload::GenerateContentRequest;

/// Anything that yields response fragments in provider order.
///
/// Production uses [`TextStream`]; tests script a fake source.
#[allow(async_fn_in_trait)]
pub trait FragmentSource {
    /// The next fragment, an error, or `None` on stream exhaustion.
    async fn next_fragment(&mut self) -> Option<Result<String, GenAiError>>;
}

/// Issue a streamed generation request.
///
/// Returns once response headers arrive; fragments are pulled from the
/// returned [`TextStream`]. Non-success statuses are mapped before any
/// fragment is yielded.
pub async fn stream_generate(
    client: &GenAiClient,
    model: &str,
    request: &GenerateContentRequest,
) -> Result<TextStream, GenAiError> {
    let url = format!(
        "{}/v1beta/models/{model}:streamGenerateContent",
        client.base_url()
    );

    let response = client
        .http()
        .post(&url)
        .query(&[("alt", "sse"), ("key", client.key())])
        .json(request)
        .send()
        .await
        .map_err(GenAiError::transport)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GenAiError::Invocation(format!("{status}: {body}")));
    }

    debug!(model, "generation stream open");
    Ok(TextStream::new(response.bytes_stream().boxed()))
}

/// SSE reader yielding text fragments from the response body.
pub struct TextStream {
    bytes: BoxStream<'static, reqwest::Result<Bytes>>,
    /// Undelimited tail of the SSE byte stream.
    buffer: String,
    /// Fragments parsed but not yet handed to the caller.
    pending: VecDeque<String>,
    done: bool,
}

impl TextStream {
    pub(crate) fn new(bytes: BoxStream<'static, reqwest::Result<Bytes>>) -> Self {
        TextStream {
            bytes,
            buffer: String::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Read one network chunk into the line buffer and parse any
    /// complete `data:` lines. Returns `false` on end of stream.
    async fn fill(&mut self) -> Result<bool, GenAiError> {
        let Some(chunk) = self.bytes.next().await else {
            return Ok(false);
        };
        let chunk = chunk.map_err(GenAiError::transport)?;
        self.buffer.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            let line = line.trim();
            if let Some(json) = line.strip_prefix("data:") {
                self.pending.extend(parse_chunk(json.trim())?);
            }
        }
        Ok(true)
    }
}

impl FragmentSource for TextStream {
    async fn next_fragment(&mut self) -> Option<Result<String, GenAiError>> {
        loop {
            if let Some(fragment) = self.pending.pop_front() {
                return Some(Ok(fragment));
            }
            if self.done {
                return None;
            }
            match self.fill().await {
                Ok(true) => {}
                Ok(false) => {
                    self.done = true;
                    // A final event without a trailing newline still counts.
                    let leftover = std::mem::take(&mut self.buffer);
                    if let Some(json) = leftover.trim().strip_prefix("data:") {
                        match parse_chunk(json.trim()) {
                            Ok(fragments) => self.pending.extend(fragments),
                            Err(e) => return Some(Err(e)),
                        }
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Extract the text fragments from one SSE chunk.
///
/// A prompt-level block reason or a `SAFETY` finish turns the whole
/// stream into a content-safety rejection.
pub fn parse_chunk(json: &str) -> Result<Vec<String>, GenAiError> {
    let chunk: StreamChunk =
        serde_json::from_str(json).map_err(|e| GenAiError::ResponseParse(e.to_string()))?;

    if let Some(feedback) = &chunk.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            return Err(GenAiError::SafetyBlocked(reason.clone()));
        }
    }

    let mut fragments = Vec::new();
    for candidate in &chunk.candidates {
        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(GenAiError::SafetyBlocked("SAFETY finish".to_string()));
        }
        if candidate.grounding_metadata.is_some() {
            debug!("chunk carries grounding metadata");
        }
        if let Some(content) = &candidate.content {
            for part in &content.parts {
                if let Some(text) = &part.text {
                    if !text.is_empty() {
                        fragments.push(text.clone());
                    }
                }
            }
        }
    }
    Ok(fragments)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
    grounding_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}
