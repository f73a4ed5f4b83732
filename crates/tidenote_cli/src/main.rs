//! Command-line presentation layer for tidenote.
//!
//! # Responsibility
//! - Render the filtered note list and the creation flow in a terminal.
//! - Invoke notes manager operations on user actions.
//!
//! # Invariants
//! - Validation failures surface per field on stderr and exit non-zero.
//! - Bulk clear always goes through the manager's two-phase flow.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;
use tidenote_core::{
    init_logging, open_store, Note, NotesManager, SnapshotRepository, SqliteSnapshotRepository,
};

mod config;

use config::Settings;

#[derive(Parser, Debug)]
#[command(name = "tidenote", about = "Take, view, search, and manage your notes.")]
struct Cli {
    /// Directory holding the note store (default: TIDENOTE_DATA_DIR or temp).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Directory for rolling log files (default: <data-dir>/logs).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new note.
    Add { title: String, content: String },
    /// List all notes, newest first.
    List,
    /// List notes whose title or content contains the query.
    Search { query: String },
    /// Remove one note by id. Removing an unknown id is not an error.
    Remove { id: String },
    /// Remove every note. Asks for confirmation unless --yes is given.
    Clear {
        /// Confirm the clear without prompting.
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(cli.data_dir, cli.log_dir, cli.log_level);

    if let Err(err) = init_logging(&settings.log_level, &settings.log_dir.to_string_lossy()) {
        eprintln!("warning: file logging disabled: {err}");
    }

    if let Some(parent) = settings.store_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create data directory {}", parent.display()))?;
    }
    let conn = open_store(&settings.store_path)
        .with_context(|| format!("open note store at {}", settings.store_path.display()))?;
    let repo = SqliteSnapshotRepository::try_new(&conn).context("prepare note store")?;
    let manager = NotesManager::load(repo);

    run_command(cli.command, manager)
}

fn run_command<R: SnapshotRepository>(command: Command, mut manager: NotesManager<R>) -> Result<()> {
    match command {
        Command::Add { title, content } => {
            info!("event=cli_command module=cli command=add");
            match manager.add(&title, &content) {
                Ok(note) => println!("Added note {}.", note.id),
                Err(errors) => {
                    for (field, message) in errors.iter() {
                        eprintln!("{field}: {message}");
                    }
                    std::process::exit(1);
                }
            }
        }
        Command::List => {
            info!("event=cli_command module=cli command=list");
            if manager.is_empty() {
                println!("No notes yet. Add your first note with `tidenote add`.");
            } else {
                render_notes(manager.notes().iter());
            }
        }
        Command::Search { query } => {
            info!("event=cli_command module=cli command=search");
            if manager.is_empty() {
                println!("No notes yet. Add your first note with `tidenote add`.");
            } else {
                let hits = manager.search(&query);
                if hits.is_empty() {
                    println!("No notes found matching \"{query}\".");
                } else {
                    render_notes(hits.into_iter());
                }
            }
        }
        Command::Remove { id } => {
            info!("event=cli_command module=cli command=remove");
            if manager.remove(&id) {
                println!("Removed note {id}.");
            } else {
                println!("No note with id {id}; nothing to remove.");
            }
        }
        Command::Clear { yes } => {
            info!("event=cli_command module=cli command=clear");
            if !manager.request_clear_all() {
                println!("No notes to clear.");
                return Ok(());
            }
            let confirmed = yes || prompt_clear_confirmation(manager.len())?;
            if confirmed {
                manager.confirm_clear_all();
                println!("All notes cleared.");
            } else {
                manager.cancel_clear_all();
                println!("Cancelled; notes left intact.");
            }
        }
    }

    Ok(())
}

fn render_notes<'a>(notes: impl Iterator<Item = &'a Note>) {
    for note in notes {
        println!(
            "[{}] {}  (id {})",
            note.created_at.format("%Y-%m-%d %H:%M"),
            note.title,
            note.id
        );
        println!("    {}", note.content);
    }
}

fn prompt_clear_confirmation(count: usize) -> Result<bool> {
    println!("This will delete all {count} note(s). This action is not reversible.");
    print!("Type 'yes' to confirm: ");
    io::stdout().flush().context("flush prompt")?;

    let mut line = String::new();
    io::stdin().read_line(&mut line).context("read confirmation")?;
    Ok(line.trim().eq_ignore_ascii_case("yes"))
}
