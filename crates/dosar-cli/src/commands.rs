//! Shell commands: attachments, case management, export, audio.
//!
//! Per-file attachment errors (duplicate name, unsupported type,
//! upload failure) are reported for that file and never abort the rest
//! of the batch or the chat session.

use std::path::{Path, PathBuf};

use tracing::warn;

use dosar_core::models::attachment::{mime_for_extension, Attachment, AttachmentData};
use dosar_core::postprocess;
use dosar_core::models::ChatRole;
use dosar_export::docx::generate_docx;
use dosar_export::render::{render_consultation, ConsultationMeta};
use dosar_export::styles::DocumentStyles;
use dosar_genai::{files, GenAiClient};

use crate::config::{self, UploadMode};
use crate::session::CaseSession;

/// A parsed `:`-command from the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Attach(Vec<String>),
    Case,
    Remove(String),
    Reset,
    Export(Option<String>),
    Audio(bool),
    Help,
    Quit,
}

/// Parse a shell line. Returns `None` for plain chat input, and an
/// error message for a malformed command.
pub fn parse_command(line: &str) -> Option<Result<Command, String>> {
    let line = line.trim();
    if !line.starts_with(':') {
        return None;
    }

    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default();
    let rest: Vec<String> = words.map(str::to_string).collect();

    let parsed = match head {
        ":attach" => {
            if rest.is_empty() {
                Err("folosire: :attach <fișier>…".to_string())
            } else {
                Ok(Command::Attach(rest))
            }
        }
        ":case" | ":dosar" => Ok(Command::Case),
        ":remove" => match rest.as_slice() {
            [name] => Ok(Command::Remove(name.clone())),
            _ => Err("folosire: :remove <nume>".to_string()),
        },
        ":reset" => Ok(Command::Reset),
        ":export" => Ok(Command::Export(rest.first().cloned())),
        ":audio" => match rest.first().map(String::as_str) {
            Some("on") => Ok(Command::Audio(true)),
            Some("off") => Ok(Command::Audio(false)),
            _ => Err("folosire: :audio on|off".to_string()),
        },
        ":help" => Ok(Command::Help),
        ":quit" | ":q" => Ok(Command::Quit),
        other => Err(format!("comandă necunoscută: {other} (vezi :help)")),
    };
    Some(parsed)
}

pub const HELP_TEXT: &str = "\
:attach <fișier>…   adaugă documente la dosar (jpg, png, pdf)
:case               listează documentele din dosar
:remove <nume>      scoate un document din dosar
:reset              caz nou — șterge conversația și dosarul
:export [fișier]    exportă ultimul răspuns ca document DOCX
:audio on|off       citește răspunsurile cu voce tare
:quit               ieșire";

/// Register a batch of files with the case.
///
/// Each file is handled independently: duplicates are skipped before
/// any network call, and an upload failure for one file leaves the
/// others untouched.
pub async fn attach_files(
    client: &GenAiClient,
    mode: UploadMode,
    session: &mut CaseSession,
    paths: &[String],
) {
    for raw in paths {
        let path = Path::new(raw);
        let display_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                println!("✖ {raw}: nume de fișier invalid");
                continue;
            }
        };

        if session.case.contains(&display_name) {
            println!("• {display_name}: deja în dosar");
            continue;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let Some(mime_type) = mime_for_extension(ext) else {
            println!("✖ {display_name}: tip de fișier neacceptat");
            continue;
        };

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                println!("✖ {display_name}: {e}");
                continue;
            }
        };

        let data = match mode {
            UploadMode::Inline => AttachmentData::Inline { bytes },
            UploadMode::Remote => {
                println!("… se încarcă {display_name}");
                match upload_remote(client, bytes, &display_name, mime_type).await {
                    Ok(uri) => AttachmentData::Remote { uri },
                    Err(e) => {
                        warn!(display_name = %display_name, error = %e, "attachment upload failed");
                        println!("✖ {display_name}: {e}");
                        continue;
                    }
                }
            }
        };

        let attachment = Attachment {
            display_name: display_name.clone(),
            mime_type: mime_type.to_string(),
            data,
        };
        match session.case.register(attachment) {
            Ok(()) => println!("✔ {display_name} indexat"),
            Err(e) => println!("✖ {display_name}: {e}"),
        }
    }
}

async fn upload_remote(
    client: &GenAiClient,
    bytes: Vec<u8>,
    display_name: &str,
    mime_type: &str,
) -> Result<String, dosar_genai::GenAiError> {
    let uploaded = files::upload(client, bytes, display_name, mime_type).await?;
    let active = files::wait_until_active(client, uploaded).await?;
    Ok(active.uri)
}

/// Print the current case contents.
pub fn show_case(session: &CaseSession) {
    if session.case.is_empty() {
        println!("Dosar gol.");
        return;
    }
    println!("Dosar activ: {} acte", session.case.len());
    for attachment in session.case.attachments() {
        println!("  📎 {} ({})", attachment.display_name, attachment.mime_type);
    }
}

/// Remove one attachment by display name.
pub fn remove_attachment(session: &mut CaseSession, name: &str) {
    if session.case.remove(name) {
        println!("Scos din dosar: {name}");
    } else {
        println!("Nu există în dosar: {name}");
    }
}

/// Reset the case: transcript and attachments. Idempotent.
pub fn reset_case(session: &mut CaseSession) -> eyre::Result<()> {
    session.store.clear(session.id)?;
    session.case.clear();
    println!("Caz nou — conversația și dosarul au fost golite.");
    Ok(())
}

/// Export the most recent assistant answer as a DOCX consultation.
pub fn export_last_answer(session: &CaseSession, path: Option<&str>) -> eyre::Result<PathBuf> {
    let transcript = session.store.load(session.id)?;
    let answer = transcript
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::Assistant)
        .ok_or_else(|| eyre::eyre!("nu există încă un răspuns de exportat"))?;

    let meta = ConsultationMeta {
        title: "Consultație ONRC".to_string(),
        case_id: session.id.to_string(),
        date: jiff::Zoned::now().strftime("%Y-%m-%d").to_string(),
    };
    let rendered = render_consultation(&meta, &postprocess::clean(&answer.content))?;
    let bytes = generate_docx(&rendered, &DocumentStyles::default())?;

    let out = match path {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(format!("consultatie-{}.docx", short_id(session))),
    };
    std::fs::write(&out, bytes)?;
    Ok(out)
}

/// Synthesize the answer and write the MP3 next to the transcript.
pub async fn speak_answer(display_text: &str, language: &str) -> eyre::Result<PathBuf> {
    let prepared = dosar_speech::prepare_speech_text(display_text);
    let audio = dosar_speech::synthesize(&prepared, language).await?;
    if audio.is_empty() {
        eyre::bail!("nimic de citit");
    }

    let out = config::data_dir()?.join(format!(
        "raspuns-{}.mp3",
        jiff::Timestamp::now().as_second()
    ));
    std::fs::write(&out, audio)?;
    Ok(out)
}

fn short_id(session: &CaseSession) -> String {
    session.id.to_string().chars().take(8).collect()
}
