use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use ndc_terminal::config::Config;
use ndc_terminal::logging::init_tracing;
use ndc_terminal::replay::{apply, ReplayEvent};
use ndc_terminal::settings::{FileSettings, MemorySettings, Settings};
use ndc_terminal::terminal::Terminal;

/// Replay host messages, key presses and card reads against a terminal core.
#[derive(Debug, Parser)]
#[command(name = "ndc-terminal", version)]
struct Cli {
    /// Config file (default: <config dir>/ndc-terminal/config.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// JSON-lines event script; stdin when omitted
    #[arg(long, short = 's')]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let settings: Arc<dyn Settings> = match &config.settings.path {
        Some(path) => Arc::new(FileSettings::open(path).context("Failed to open settings")?),
        None => Arc::new(MemorySettings::new()),
    };
    let mut terminal = Terminal::with_config(settings, config.terminal.clone());

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open script {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read script")?;
        let Some(event) = parse_line(&line, index + 1) else {
            continue;
        };

        let report = apply(&mut terminal, event);
        serde_json::to_writer(&mut out, &report)?;
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

/// Decode one script line. Blank lines and `#` comments are skipped;
/// malformed lines are reported on stderr and skipped.
fn parse_line(line: &str, line_number: usize) -> Option<ReplayEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    match serde_json::from_str(trimmed) {
        Ok(event) => Some(event),
        Err(err) => {
            eprintln!("line {}: {}", line_number, err);
            None
        }
    }
}
