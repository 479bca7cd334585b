//! One generation turn: request, stream, commit.
//!
//! The turn controller owns the `Idle → Requesting → Streaming →
//! Committed` lifecycle. Fragments reach the display sink in exactly
//! the order the provider emits them; the accumulated raw text is
//! committed to the transcript as one assistant message only on clean
//! stream exhaustion. Any failure discards the partial accumulator —
//! the store never sees a half answer.

use std::future::Future;

use thiserror::Error;
use tracing::debug;

use dosar_core::models::{ChatRole, SessionId};
use dosar_core::postprocess;
use dosar_genai::payload::{assemble_contents, build_request};
use dosar_genai::stream::{stream_generate, FragmentSource};
use dosar_genai::{GenAiClient, GenAiError};
use dosar_storage::{StorageError, TranscriptStore};

use crate::session::CaseSession;

/// Fixed system instruction for every request.
pub const SYSTEM_PROMPT: &str = "\
Ești Avocat Expert ONRC (România).
Analizează documentele atașate (dacă există) și răspunde concis.
Folosește căutarea web pentru verificarea taxelor și legilor la zi.";

/// Where streamed output goes.
pub trait DisplaySink {
    /// One streamed fragment, in provider order.
    fn fragment(&mut self, fragment: &str);
    /// The cleaned final text, exactly once per committed turn.
    fn finalize(&mut self, display_text: &str);
}

/// Lifecycle of one generation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    Requesting,
    Streaming,
    Committed,
    Failed,
}

#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Generation(#[from] GenAiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of a committed turn. `raw_text` is what the store holds;
/// `display_text` is the cleaned form side effects consume.
#[derive(Debug)]
pub struct TurnOutcome {
    pub raw_text: String,
    pub display_text: String,
}

/// Drive one turn from request to commit.
///
/// `open_stream` is awaited in `Requesting`; the first fragment moves
/// the turn to `Streaming`; exhaustion cleans, commits, and notifies
/// the sink. Errors anywhere transition to `Failed` with nothing
/// committed.
pub async fn run_turn<S, Fut>(
    store: &TranscriptStore,
    session_id: SessionId,
    open_stream: Fut,
    sink: &mut dyn DisplaySink,
) -> Result<TurnOutcome, TurnError>
where
    S: FragmentSource,
    Fut: Future<Output = Result<S, GenAiError>>,
{
    let mut state = TurnState::Requesting;
    debug!(?state, %session_id, "turn started");

    let mut source = match open_stream.await {
        Ok(source) => source,
        Err(e) => {
            state = TurnState::Failed;
            debug!(?state, "request failed");
            return Err(e.into());
        }
    };

    let mut accumulated = String::new();
    while let Some(fragment) = source.next_fragment().await {
        match fragment {
            Ok(text) => {
                if state == TurnState::Requesting {
                    state = TurnState::Streaming;
                    debug!(?state, "first fragment");
                }
                accumulated.push_str(&text);
                sink.fragment(&text);
            }
            Err(e) => {
                state = TurnState::Failed;
                debug!(?state, partial_chars = accumulated.len(), "stream failed");
                return Err(e.into());
            }
        }
    }

    let display_text = postprocess::clean(&accumulated);
    if let Err(e) = store.append(session_id, ChatRole::Assistant, &accumulated) {
        state = TurnState::Failed;
        debug!(?state, "commit failed");
        return Err(e.into());
    }
    sink.finalize(&display_text);

    state = TurnState::Committed;
    debug!(?state, chars = accumulated.len(), "turn committed");
    Ok(TurnOutcome {
        raw_text: accumulated,
        display_text,
    })
}

/// Full submission flow for one user input.
///
/// Ordering contract: the user turn is durably appended before the
/// request is issued, and the payload history is the transcript prior
/// to that turn.
pub async fn consult(
    client: &GenAiClient,
    model: &str,
    session: &CaseSession,
    user_input: &str,
    sink: &mut dyn DisplaySink,
) -> Result<TurnOutcome, TurnError> {
    let history = session.store.load(session.id)?;
    session.store.append(session.id, ChatRole::User, user_input)?;

    let contents = assemble_contents(&history, session.case.attachments(), user_input);
    let request = build_request(contents, SYSTEM_PROMPT);

    run_turn(
        &session.store,
        session.id,
        stream_generate(client, model, &request),
        sink,
    )
    .await
}
