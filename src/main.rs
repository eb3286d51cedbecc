// Chunk: docs/chunks/preview_cli - Command-line preview collaborator

//! glance: prints a syntax-highlighted preview of a source file.
//!
//! The output is plain text: each line carries its gutter number and indent
//! guides, but no escape sequences. Set `RUST_LOG=debug` to see which
//! grammar and queries were used.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use glance_syntax::{language_for_path, Content, PreviewConfig, PreviewRenderer};

/// glance - source previews with line numbers and indent guides
#[derive(Parser, Debug)]
#[command(name = "glance")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to preview
    path: PathBuf,

    /// Language key (python, rust, json, ...); inferred from the extension if omitted
    #[arg(short, long, value_name = "KEY")]
    language: Option<String>,

    /// Preview configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory containing {language}/highlights.scm and {language}/locals.scm
    #[arg(long, value_name = "DIR")]
    query_root: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in preview(&cli)? {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

fn preview(cli: &Cli) -> Result<Vec<String>> {
    let mut config = match &cli.config {
        Some(path) => PreviewConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PreviewConfig::default(),
    };
    if let Some(root) = &cli.query_root {
        config.query_root = root.clone();
    }

    let language = cli
        .language
        .as_deref()
        .or_else(|| language_for_path(&cli.path));
    log::debug!(
        "previewing {} as {}",
        cli.path.display(),
        language.unwrap_or("plain text")
    );

    let content = read_content(&cli.path)?;
    let renderer = PreviewRenderer::from_config(config);
    let lines = renderer.render(&content, language);
    Ok(lines.iter().map(|line| line.text()).collect())
}

fn read_content(path: &Path) -> Result<Content> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(Content::from_bytes(bytes))
}
