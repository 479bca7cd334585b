//! dosar-speech
//!
//! Spoken answers via the translate TTS endpoint. The endpoint caps
//! each request at a short utterance, so the prepared text is split
//! into whitespace-aligned chunks and the returned MP3 segments are
//! concatenated — MP3 frames are self-delimiting, so concatenation
//! yields a playable file.

pub mod error;

use std::time::Duration;

use tracing::info;

pub use error::SpeechError;

/// Language spoken answers default to.
pub const DEFAULT_LANGUAGE: &str = "ro";

/// Spoken answers cover at most this prefix of the cleaned text —
/// synthesis latency grows linearly with length.
pub const SPEECH_CHAR_LIMIT: usize = 500;

/// Per-request utterance cap imposed by the endpoint.
const CHUNK_CHAR_LIMIT: usize = 200;

const TTS_URL: &str = "https://translate.google.com/translate_tts";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Prepare display text for synthesis: drop emphasis asterisks, then
/// truncate to [`SPEECH_CHAR_LIMIT`] characters on a char boundary.
pub fn prepare_speech_text(display_text: &str) -> String {
    display_text
        .chars()
        .filter(|c| *c != '*')
        .take(SPEECH_CHAR_LIMIT)
        .collect()
}

/// Split text into chunks of at most `limit` characters, breaking on
/// whitespace where possible. Words longer than the limit are hard-split.
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if word_chars > limit {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            let mut piece = String::new();
            let mut piece_chars = 0usize;
            for c in word.chars() {
                if piece_chars == limit {
                    chunks.push(std::mem::take(&mut piece));
                    piece_chars = 0;
                }
                piece.push(c);
                piece_chars += 1;
            }
            if !piece.is_empty() {
                chunks.push(piece);
            }
            continue;
        }

        // +1 for the joining space.
        let needed = if current.is_empty() {
            word_chars
        } else {
            word_chars + 1
        };
        if current_chars + needed > limit {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Synthesize speech for already-prepared text.
///
/// Returns MP3 bytes; empty input yields empty bytes without a request.
pub async fn synthesize(text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
    let chunks = chunk_text(text, CHUNK_CHAR_LIMIT);
    if chunks.is_empty() {
        return Ok(Vec::new());
    }

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| SpeechError::Request(e.to_string()))?;

    let total = chunks.len();
    let mut audio = Vec::new();

    for (idx, chunk) in chunks.iter().enumerate() {
        let response = client
            .get(TTS_URL)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", chunk.as_str()),
                ("total", &total.to_string()),
                ("idx", &idx.to_string()),
                ("textlen", &chunk.chars().count().to_string()),
            ])
            .send()
            .await
            .map_err(SpeechError::transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::Request(format!(
                "chunk {idx}/{total}: {status}"
            )));
        }

        let bytes = response.bytes().await.map_err(SpeechError::transport)?;
        audio.extend_from_slice(&bytes);
    }

    info!(chunks = total, bytes = audio.len(), language, "speech synthesized");
    Ok(audio)
}
