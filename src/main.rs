//! Binary entry point: resolve settings, load the catalog, and hand control to
//! the menu loop until the user exits.
use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use book_catalog::{App, Catalog, Cli, FlatFileStore, Settings};

/// Returning a `Result` surfaces fatal startup problems, such as a corrupt
/// data file, instead of opening the menu on a catalog that would overwrite it.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = Settings::from_cli(Cli::parse());
    log::info!("using data file {}", settings.data_file.display());

    let store = FlatFileStore::new(&settings.data_file);
    let (catalog, report) = Catalog::open(store, settings.malformed)
        .context("refusing to start with an unreadable catalog")?;

    let stdin = io::stdin();
    let mut app = App::new(catalog, stdin.lock(), io::stdout()).with_color(settings.color);
    app.report_load(&report)?;
    app.run()
}
