mod script;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use editlog_config::InputConfig;
use editlog_core::{MemoryClipboard, TextInput};

/// Replays an edit script against a text-input surface with undo/redo.
#[derive(Parser, Debug)]
#[command(name = "editlog", version, about)]
struct Cli {
    /// Steps to apply in order, e.g. `insert:1:X`, `delete:0:2`,
    /// `replace:0:1:r`, `select:0:3`, `type:abc`, `undo`, `redo`, `blur`.
    steps: Vec<String>,

    /// Initial buffer content.
    #[arg(long, default_value = "")]
    text: String,

    /// Path to a JSON config file. Created with defaults if missing.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the buffer after every step.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => InputConfig::load_or_create(path),
        None => {
            let path = InputConfig::config_path();
            if path.exists() {
                InputConfig::load_or_create(&path)
            } else {
                InputConfig::default()
            }
        }
    };
    tracing::debug!(?config, "loaded input config");

    let steps = script::parse_steps(&cli.steps)?;

    let clipboard = MemoryClipboard::new();
    let mut input = TextInput::new(&config, Box::new(clipboard.clone())).with_text(&cli.text);
    input.focus();

    for (n, step) in steps.iter().enumerate() {
        let changed = script::apply(&mut input, &clipboard, step);
        tracing::debug!(step = n + 1, ?step, changed, "applied");
        if cli.verbose {
            println!(
                "{:>3}  {:<28} {:?}",
                n + 1,
                format!("{step:?}"),
                input.text()
            );
        }
    }

    println!("{}", input.text());
    input.dispose();
    Ok(())
}
