//! Binary entry point: parse arguments, bring up logging and the SQLite store,
//! hydrate the card, then either run a one-shot command or the Ratatui loop.
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use card_studio::db::{open_store_in_memory, write_snapshot};
use card_studio::{
    data_dir, default_db_path, load_or_default, open_store, run_app, vcard, App, AppOptions,
    CardDocument,
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "card-studio.log";
const IN_MEMORY_DB: &str = ":memory:";

/// Card Studio - design a digital business card and export it as a vCard
#[derive(Parser, Debug)]
#[command(name = "card-studio")]
#[command(version)]
#[command(about = "Design a digital business card and export it as a vCard")]
struct Cli {
    /// SQLite database holding the card (default: ~/.card-studio/card.sqlite)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory the .vcf file is written to (default: current directory)
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    /// Open straight into the read-only preview when set to `true`
    #[arg(long, env = "CARD_STUDIO_PREVIEW")]
    preview: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the stored card as a .vcf file and print its path
    Export,
    /// Print the stored card's vCard to stdout
    Show,
    /// Replace the stored card with the sample card
    Reset,
}

/// Only the literal `true` turns preview mode on.
fn preview_requested(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Route tracing output into a log file; the terminal owns stdout while the
/// TUI runs.
fn setup_logging() -> Result<()> {
    let dir = data_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data directory at {}", dir.display()))?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
        .context("failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install log subscriber: {err}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging()?;

    let conn = match &cli.db {
        Some(path) if path.as_os_str() == IN_MEMORY_DB => open_store_in_memory()?,
        Some(path) => open_store(path)?,
        None => open_store(&default_db_path()?)?,
    };
    let export_dir = match cli.export_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };

    match cli.command {
        Some(Command::Export) => {
            let doc = load_or_default(&conn);
            let path = vcard::export_to(&export_dir, &doc)?;
            println!("{}", path.display());
            Ok(())
        }
        Some(Command::Show) => {
            let doc = load_or_default(&conn);
            println!("{}", vcard::build(&doc));
            Ok(())
        }
        Some(Command::Reset) => {
            write_snapshot(&conn, &CardDocument::default())
                .context("failed to reset stored card")?;
            info!("stored card reset to the sample document");
            println!("Card reset.");
            Ok(())
        }
        None => {
            let doc = load_or_default(&conn);
            let options = AppOptions {
                export_dir,
                start_in_preview: preview_requested(cli.preview.as_deref()),
            };
            info!(preview = options.start_in_preview, "starting editor");
            let mut app = App::new(conn, doc, options);
            run_app(&mut app)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_flag_only_accepts_true() {
        assert!(preview_requested(Some("true")));
        assert!(!preview_requested(Some("TRUE")));
        assert!(!preview_requested(Some("1")));
        assert!(!preview_requested(None));
    }

    #[test]
    fn cli_parses_subcommands_and_paths() {
        let cli = Cli::try_parse_from(["card-studio", "--db", ":memory:", "show"]).expect("parse");
        assert_eq!(cli.db, Some(PathBuf::from(":memory:")));
        assert!(matches!(cli.command, Some(Command::Show)));
    }
}
