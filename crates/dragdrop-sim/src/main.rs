//! dragdrop-sim: replays a scripted drag over a headless drop list.
//!
//! The script describes the list's items and the pointer positions to
//! visit; every event the list emits is printed to stdout as one JSON line.
//! Logs go to stderr.

mod record;
mod runner;
mod script;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dragdrop_common::DragDropError;
use dragdrop_config::DropListConfig;

use crate::script::Script;

#[derive(Parser)]
#[command(name = "dragdrop-sim", about = "Replay a scripted drag over a headless drop list")]
struct Args {
    /// Script with the items and pointer moves to replay.
    #[arg(short, long)]
    script: PathBuf,

    /// Drop list config. Overrides the script's [config] table.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dragdrop_sim=info,dragdrop_engine=warn".into()),
        )
        .init();

    let args = Args::parse();
    match simulate(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, script = %args.script.display(), "simulation failed");
            ExitCode::FAILURE
        }
    }
}

fn simulate(args: &Args) -> Result<(), DragDropError> {
    let content = std::fs::read_to_string(&args.script)?;
    let script = Script::parse(&content)?;

    let config = match &args.config {
        Some(path) => dragdrop_config::load_from_path(path)?,
        None => {
            let config = script.config.clone().unwrap_or_default();
            dragdrop_config::validate(&config)?;
            config
        }
    };
    log_config(&config);

    let records = runner::run(&script, &config)?;
    let mut out = io::stdout().lock();
    for record in &records {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn log_config(config: &DropListConfig) {
    tracing::debug!(
        orientation = ?config.orientation,
        direction = ?config.direction,
        sorting_disabled = config.sorting_disabled,
        auto_scroll_step = config.auto_scroll_step,
        "config resolved"
    );
}
