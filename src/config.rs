use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use crate::store::{default_data_path, MalformedPolicy};

/// Interactive catalog for a personal book collection
#[derive(Debug, Parser)]
#[command(name = "book-catalog")]
#[command(version)]
#[command(about = "Interactive catalog for a personal book collection")]
pub struct Cli {
    /// Data file holding one book per line (defaults to ~/.book-catalog/library_data.txt)
    #[arg(long, env = "BOOK_CATALOG_FILE")]
    pub data_file: Option<PathBuf>,

    /// Skip unreadable lines in the data file instead of refusing to start
    #[arg(long, env = "BOOK_CATALOG_SKIP_MALFORMED")]
    pub skip_malformed: bool,

    /// Never colour output
    #[arg(long)]
    pub no_color: bool,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_file: PathBuf,
    pub malformed: MalformedPolicy,
    pub color: bool,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            data_file: cli.data_file.unwrap_or_else(default_data_path),
            malformed: if cli.skip_malformed {
                MalformedPolicy::Skip
            } else {
                MalformedPolicy::Fail
            },
            color: !cli.no_color && std::io::stdout().is_terminal(),
        }
    }
}
