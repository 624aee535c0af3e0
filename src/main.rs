use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use quill::cli::Shell;
use quill::config::{QuillPaths, DEFAULT_QUOTES_FILE, QUOTES_FILE_ENV};
use quill::storage::QuoteStore;

#[derive(Parser)]
#[command(
    name = "quill",
    version,
    about = "Terminal-based personal quote collection manager",
    long_about = "Quill keeps a personal collection of quotes in a single JSON \
                  file. Quote text, author and context are base64 encoded on \
                  disk, and each quote gets a short slug derived from its text."
)]
struct Cli {
    /// Quote file to use
    #[arg(short, long, env = QUOTES_FILE_ENV, default_value = DEFAULT_QUOTES_FILE)]
    file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    ctrlc::set_handler(|| {
        println!("\nGoodbye!");
        std::process::exit(0);
    })
    .context("Failed to install Ctrl+C handler")?;

    let paths = QuillPaths::new(cli.file);
    paths.ensure_parent_dir()?;

    let store = QuoteStore::load(paths.quotes_file())?;

    let stdin = io::stdin();
    let mut shell = Shell::new(store, paths, stdin.lock(), io::stdout());
    shell.run()?;

    Ok(())
}
