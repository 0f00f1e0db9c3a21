use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::history::{HISTORY_FILENAME, HistoryStore};
use crate::models::{CallRecord, Role};
use crate::session::{CallSession, SdkEvent};
use crate::utils::default_history_path;

#[derive(Parser)]
#[command(name = "medivoice-transcript")]
#[command(version = "0.1.0")]
#[command(about = "Inspect, replay, and manage MediVoice call transcripts", long_about = None)]
pub struct Cli {
    /// Directory holding the call history file (overrides MEDIVOICE_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List stored calls, newest first
    List,
    /// Print the full transcript of a stored call
    Show { id: i64 },
    /// Delete a stored call
    Delete { id: i64 },
    /// Delete the entire call history
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Replay a JSONL file of SDK events through a call session and store the result
    Replay {
        /// Event log, one JSON object per line: {"event":"call-start"},
        /// {"event":"message",...}, {"event":"user-speech-end","text":...},
        /// {"event":"call-end"}
        events: PathBuf,
    },
    /// Show statistics about the stored history
    Stats,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let history_path = match &cli.data_dir {
        Some(dir) => dir.join(HISTORY_FILENAME),
        None => default_history_path()?,
    };

    match &cli.command {
        Some(Commands::List) => list_calls(&history_path),
        Some(Commands::Show { id }) => show_call(&history_path, *id),
        Some(Commands::Delete { id }) => delete_call(&history_path, *id),
        Some(Commands::Clear { force }) => clear_history(&history_path, *force),
        Some(Commands::Replay { events }) => replay_events(&history_path, events),
        Some(Commands::Stats) => show_stats(&history_path),
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn list_calls(history_path: &Path) -> Result<()> {
    let store = HistoryStore::load(history_path);

    if store.is_empty() {
        println!("No calls in history");
        return Ok(());
    }

    for record in store.records() {
        println!("Call - {}  (id {})", record.date, record.id);
        println!(
            "  Duration: {} • Messages: {}",
            record.duration,
            record.spoken_message_count()
        );
    }
    Ok(())
}

fn print_transcript(record: &CallRecord) {
    for message in &record.conversation {
        println!(
            "[{}] {}: {}",
            message.timestamp.format("%H:%M:%S"),
            message.sender,
            message.text
        );
    }
}

fn show_call(history_path: &Path, id: i64) -> Result<()> {
    let store = HistoryStore::load(history_path);
    let Some(record) = store.get(id) else {
        bail!("No call with id {} in history", id);
    };

    println!("Call - {}  (duration {})", record.date, record.duration);
    println!();
    print_transcript(record);
    Ok(())
}

fn delete_call(history_path: &Path, id: i64) -> Result<()> {
    let mut store = HistoryStore::load(history_path);
    if store.delete(id) {
        println!("Deleted call {}", id);
    } else {
        println!("No call with id {} in history", id);
    }
    Ok(())
}

fn clear_history(history_path: &Path, force: bool) -> Result<()> {
    let mut store = HistoryStore::load(history_path);

    if store.is_empty() {
        println!("No calls in history");
        return Ok(());
    }

    if !force {
        print!("Clear all call history ({} calls)? [y/N] ", store.len());
        io::stdout().flush().context("Failed to flush stdout")?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer).context("Failed to read confirmation")?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Aborted");
            return Ok(());
        }
    }

    store.clear();
    println!("Call history cleared");
    Ok(())
}

/// Feed a recorded event log through a fresh call session. Malformed lines
/// are logged and skipped; events arriving outside a call are ignored, both
/// because a live page would see the same stream.
fn replay_events(history_path: &Path, events_path: &Path) -> Result<()> {
    let file = File::open(events_path)
        .with_context(|| format!("Failed to open event log {}", events_path.display()))?;
    let reader = BufReader::new(file);

    let mut store = HistoryStore::load(history_path);
    let mut session: Option<CallSession> = None;
    let mut stored = 0;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read line from event log")?;
        if line.trim().is_empty() {
            continue;
        }

        let event: SdkEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                eprintln!("Warning: skipping malformed event on line {}: {}", line_num + 1, e);
                continue;
            }
        };

        match event {
            SdkEvent::CallStart => {
                if session.is_some() {
                    eprintln!(
                        "Warning: call-start on line {} while a call is active, restarting",
                        line_num + 1
                    );
                }
                session = Some(CallSession::start());
            }
            SdkEvent::CallEnd => match session.take() {
                Some(active) => stored += finish_call(&mut store, active),
                None => {
                    eprintln!("Warning: call-end on line {} without a call, ignored", line_num + 1)
                }
            },
            other => match session.as_mut() {
                Some(active) => active.handle_event(other),
                None => eprintln!(
                    "Warning: event on line {} arrived before call-start, ignored",
                    line_num + 1
                ),
            },
        }
    }

    // An unterminated log still flushes its in-progress call.
    if let Some(active) = session.take() {
        eprintln!("Warning: event log ended without call-end, finalizing anyway");
        stored += finish_call(&mut store, active);
    }

    println!();
    println!("Replay complete: {} call(s) stored, {} total in history", stored, store.len());
    Ok(())
}

fn finish_call(store: &mut HistoryStore, session: CallSession) -> usize {
    let finished = session.end();
    match store.finalize_call(finished.conversation, &finished.duration) {
        Some(record) => {
            println!("Stored call {} ({} messages)", record.id, record.spoken_message_count());
            print_transcript(record);
            1
        }
        None => 0,
    }
}

fn show_stats(history_path: &Path) -> Result<()> {
    let store = HistoryStore::load(history_path);

    let mut user = 0;
    let mut ai = 0;
    let mut system = 0;
    for record in store.records() {
        for message in &record.conversation {
            match message.role {
                Role::User => user += 1,
                Role::Ai => ai += 1,
                Role::System => system += 1,
            }
        }
    }

    println!("MediVoice Call History Statistics");
    println!("==================================");
    println!("Calls stored: {}", store.len());
    println!("Total messages: {}", user + ai + system);
    println!("  User: {}", user);
    println!("  AI: {}", ai);
    println!("  System: {}", system);
    println!();
    println!("History file: {}", history_path.display());

    if let Some(oldest) = store.records().last() {
        println!("Oldest call: {}", oldest.date);
    }
    if let Some(newest) = store.records().first() {
        println!("Newest call: {}", newest.date);
    }

    Ok(())
}
