use std::io::Write as _;
use std::path::PathBuf;

use clap::Parser;
use eyre::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use dosar_cli::chat::{self, DisplaySink, TurnError};
use dosar_cli::commands::{self, Command, HELP_TEXT};
use dosar_cli::config;
use dosar_cli::session::{self, CaseSession};
use dosar_core::models::SessionId;
use dosar_genai::{GenAiClient, GenAiError};
use dosar_storage::TranscriptStore;

/// Consultant juridic ONRC — chat cu documente, export și audio.
#[derive(Debug, Parser)]
#[command(name = "dosar", version)]
struct Cli {
    /// Reattach to an existing case by session id.
    #[arg(long)]
    session: Option<SessionId>,

    /// Chat model override.
    #[arg(long)]
    model: Option<String>,

    /// Transcript database path override.
    #[arg(long)]
    db: Option<PathBuf>,
}

/// Streams fragments straight to stdout.
struct TerminalSink;

impl DisplaySink for TerminalSink {
    fn fragment(&mut self, fragment: &str) {
        print!("{fragment}");
        let _ = std::io::stdout().flush();
    }

    fn finalize(&mut self, _display_text: &str) {
        println!();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let cfg = config::load_or_default()?;
    let api_key = config::resolve_api_key(&cfg)?;
    let client = GenAiClient::new(api_key)?;
    let model = cli.model.clone().unwrap_or_else(|| cfg.model.clone());

    let db_path = match cli.db {
        Some(path) => path,
        None => config::default_db_path()?,
    };
    let store = TranscriptStore::open(&db_path)?;

    let id = session::resolve_session_id(cli.session)?;
    let mut session = CaseSession::new(id, store);

    println!("⚖️  Avocat Consultant ONRC");
    println!("Sesiune: {id} ({} mesaje)", session.store.message_count(id)?);
    println!("Comenzi: :help\n");

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("dosar> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(&line);

        match commands::parse_command(&line) {
            Some(Ok(Command::Quit)) => break,
            Some(Ok(Command::Help)) => println!("{HELP_TEXT}"),
            Some(Ok(Command::Case)) => commands::show_case(&session),
            Some(Ok(Command::Remove(name))) => commands::remove_attachment(&mut session, &name),
            Some(Ok(Command::Reset)) => commands::reset_case(&mut session)?,
            Some(Ok(Command::Audio(enabled))) => {
                session.audio_enabled = enabled;
                println!("Audio: {}", if enabled { "pornit" } else { "oprit" });
            }
            Some(Ok(Command::Attach(paths))) => {
                commands::attach_files(&client, cfg.upload_mode, &mut session, &paths).await;
            }
            Some(Ok(Command::Export(path))) => {
                match commands::export_last_answer(&session, path.as_deref()) {
                    Ok(out) => println!("Exportat: {}", out.display()),
                    Err(e) => println!("Export eșuat: {e}"),
                }
            }
            Some(Err(message)) => println!("{message}"),
            None => {
                run_consultation(&client, &model, &mut session, &cfg.language, &line).await;
            }
        }
    }

    println!("La revedere.");
    Ok(())
}

/// One chat turn plus its post-commit side effects.
async fn run_consultation(
    client: &GenAiClient,
    model: &str,
    session: &mut CaseSession,
    language: &str,
    input: &str,
) {
    let mut sink = TerminalSink;
    match chat::consult(client, model, session, input, &mut sink).await {
        Ok(outcome) => {
            if session.audio_enabled {
                match commands::speak_answer(&outcome.display_text, language).await {
                    Ok(path) => println!("🔊 {}", path.display()),
                    Err(e) => println!("Audio indisponibil: {e}"),
                }
            }
        }
        Err(e) => report_turn_error(&e),
    }
}

/// Failure notice for the user; the transcript keeps only fully
/// committed turns, so there is nothing to undo here.
fn report_turn_error(error: &TurnError) {
    match error {
        TurnError::Generation(GenAiError::Timeout) => {
            println!(
                "Eroare: cererea a expirat. Încearcă o întrebare mai scurtă sau mai puține documente."
            );
        }
        TurnError::Generation(GenAiError::SafetyBlocked(_)) => {
            println!("Eroare: răspunsul a fost blocat de filtrele de siguranță.");
        }
        other => println!("Eroare: {other}"),
    }
}
