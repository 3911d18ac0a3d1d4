//! flashcards CLI — an interactive flashcard trainer on stdin/stdout.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use flashcards_core::config::load_config_from;
use flashcards_core::console;
use flashcards_core::session::Session;

#[derive(Parser)]
#[command(name = "flashcards", version, about = "Interactive flashcard trainer")]
struct Cli {
    /// Card set to load before the first prompt
    #[arg(long = "import_from", visible_alias = "import-from")]
    import_from: Option<PathBuf>,

    /// Card set to save on exit
    #[arg(long = "export_to", visible_alias = "export-to")]
    export_to: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the quiz card draws
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flashcards=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let mut config = load_config_from(cli.config.as_deref())?;
    if cli.import_from.is_some() {
        config.import_from = cli.import_from;
    }
    if cli.export_to.is_some() {
        config.export_to = cli.export_to;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    tracing::debug!(?config, "starting session");

    let (input, output) = console::stdio();
    let mut session = Session::new(config.session_config(), input, output);
    session.run().context("session ended abnormally")?;
    Ok(())
}
