//! CLI module for the Jira ingest tool.

pub mod ingest;
pub mod output;

use std::future::Future;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

pub use ingest::handle_ingest;

/// Upload a Jira CSV export to Qdrant using OpenAI embeddings.
#[derive(Debug, Parser)]
#[command(name = "jira-ingest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the CSV export (must contain id, title and description columns)
    #[arg(required = true)]
    pub csv_path: PathBuf,

    /// Row index to start from; earlier rows are neither embedded nor uploaded
    #[arg(default_value_t = 0)]
    pub start_line: usize,
}

/// Drive `work` to completion unless `shutdown` resolves first.
///
/// An interrupted run is reported as an error.
pub async fn run_until_shutdown<W, S>(work: W, shutdown: S) -> Result<()>
where
    W: Future<Output = Result<()>>,
    S: Future<Output = ()>,
{
    tokio::select! {
        result = work => result,
        _ = shutdown => {
            eprintln!("\nReceived shutdown signal, stopping upload.");
            eprintln!("Re-run with a start line to resume after the last uploaded batch.");
            bail!("upload interrupted by shutdown signal")
        }
    }
}
