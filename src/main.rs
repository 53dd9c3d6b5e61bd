use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use clone_pad::app::infrastructure::error::Result;
use clone_pad::app::{AppSettings, NoteListController, NoteStore, RtfCodec, SessionOutcome};

#[derive(Parser)]
#[command(name = "ClonePad")]
#[command(about = "A tiny rich-text notepad; the last note you edit stays on top")]
#[command(version)]
struct Cli {
    /// Notes file to use instead of the configured one
    #[arg(short, long, env = "CLONEPAD_FILE", global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List note titles, most recently edited first
    List,

    /// Print the text of a note
    Show {
        /// Position in the list
        index: usize,
    },

    /// Write a new note; each argument becomes one line
    New {
        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Replace the text of a note and move it to the top
    Edit {
        /// Position in the list
        index: usize,

        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Delete a note
    Delete {
        /// Position in the list
        index: usize,
    },

    /// Print the location of the notes file
    Path,
}

type List = NoteListController<RtfCodec>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let (settings, settings_error) = match AppSettings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (AppSettings::default(), Some(e)),
    };
    init_logging(&settings);
    if let Some(e) = settings_error {
        log::warn!("{}. Using default settings.", e);
    }

    let mut stdout = io::stdout().lock();
    match run(cli, &settings, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(settings: &AppSettings) {
    let check = settings.validate();
    let level = match check {
        Ok(()) => settings.log_level.as_str(),
        Err(_) => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    if let Err(e) = check {
        log::warn!("{}", e);
    }
}

/// Run one command. Only a bad note index (or a failing `out`) is an error;
/// notes that cannot be read or saved are reported on `out` and the command
/// still succeeds.
fn run<W: Write>(cli: Cli, settings: &AppSettings, out: &mut W) -> Result<()> {
    let store = notes_store(cli.file, settings);

    match cli.command {
        Commands::Path => writeln!(out, "{}", store.file_path().display())?,
        Commands::List => {
            let list = open_list(store, settings, out)?;
            if list.has_unreadable_file() {
                writeln!(
                    out,
                    "The notes file could not be read. It is kept as it is until you add a note."
                )?;
            } else if list.row_count() == 0 {
                writeln!(out, "No notes yet.")?;
            }
            for (index, title) in list.rows().enumerate() {
                writeln!(out, "{:>3}  {}", index, title)?;
            }
        }
        Commands::Show { index } => {
            let list = open_list(store, settings, out)?;
            writeln!(out, "{}", list.peek(index)?.plain_text())?;
        }
        Commands::New { lines } => {
            let mut list = open_list(store, settings, out)?;
            let mut session = list.compose();
            session.document_mut().set_plain_text(&lines.join("\n"));
            session.close();
            appear(&mut list, out)?;
        }
        Commands::Edit { index, lines } => {
            let mut list = open_list(store, settings, out)?;
            let mut session = list.select_row(index)?;
            session.document_mut().set_plain_text(&lines.join("\n"));
            session.close();
            appear(&mut list, out)?;
        }
        Commands::Delete { index } => {
            let mut list = open_list(store, settings, out)?;
            let mut session = list.select_row(index)?;
            session.confirm_delete();
            if session.close() == SessionOutcome::Deleted {
                writeln!(out, "Deleted note {}.", index)?;
            }
            appear(&mut list, out)?;
        }
    }

    Ok(())
}

/// `--file` first, then the settings file, then the documents directory.
fn notes_store(file: Option<PathBuf>, settings: &AppSettings) -> NoteStore {
    let store = match file.or_else(|| settings.notes_file.clone()) {
        Some(path) => NoteStore::new(path),
        None => NoteStore::at_default_location(),
    };
    store.with_pretty_json(settings.pretty_json)
}

/// Load the list and save it straight back, as the list screen does when it first appears.
fn open_list<W: Write>(store: NoteStore, settings: &AppSettings, out: &mut W) -> Result<List> {
    let mut list = NoteListController::load(store, RtfCodec, settings);
    appear(&mut list, out)?;
    Ok(list)
}

fn appear<W: Write>(list: &mut List, out: &mut W) -> Result<()> {
    if let Some(e) = list.did_appear() {
        writeln!(out, "Warning: changes were not saved: {}", e)?;
    }
    Ok(())
}
