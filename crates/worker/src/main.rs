// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! idxw - code-intel indexing worker
//!
//! One-shot entry point: processes exactly one indexing job handed over on
//! the command line. The dequeue loop that normally feeds jobs to the
//! handler lives in the surrounding fleet tooling, not here.

use anyhow::Result;
use clap::Parser;
use idx_adapters::SystemCommander;
use idx_core::{ActiveJobTracker, IndexJob};
use idx_worker::{Handler, HandlerOptions};

#[derive(Parser)]
#[command(
    name = "idxw",
    version,
    about = "Code-intel indexing worker - process one queued job"
)]
struct Cli {
    /// Queue-assigned job id
    #[arg(long)]
    id: u64,

    /// Repository name, e.g. github.com/acme/widget
    #[arg(long)]
    repo: String,

    /// Commit to materialize and index
    #[arg(long)]
    commit: String,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let options = HandlerOptions::from_env()?;
    let handler = Handler::new(ActiveJobTracker::new(), SystemCommander::new(), options);

    let job = IndexJob::new(cli.id, cli.repo, cli.commit);
    handler.handle(&job).await?;
    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Logs go to stderr; the child processes' own output is inherited and
    // interleaves on the same streams.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
