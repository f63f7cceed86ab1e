//! Ingest command implementation.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::Cli;
use crate::cli::output::format_ingest_stats;
use crate::models::Config;
use crate::services::{EmbeddingClient, QdrantBackend, RunLog, run_ingest};
use crate::sources::CsvSource;

pub async fn handle_ingest(cli: Cli) -> Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    println!("Connecting to Qdrant at {} ...", config.vector_store.url);
    let vector_store =
        QdrantBackend::new(&config.vector_store).context("failed to create Qdrant client")?;
    let embedding_client =
        EmbeddingClient::new(&config.embedding).context("failed to create embedding client")?;

    println!("Reading CSV: {}", cli.csv_path.display());
    let source = CsvSource::load(&cli.csv_path)
        .with_context(|| format!("failed to load {}", cli.csv_path.display()))?;
    println!("Loaded {} rows.", source.len());
    println!(
        "Embedding with {} into collection '{}' (batch size {})",
        config.embedding.model, config.vector_store.collection, config.ingest.batch_size
    );

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )
            .context("invalid progress bar template")?
            .progress_chars("#>-"),
    );

    let mut stdout = std::io::stdout();
    let mut log = RunLog::new(&pb, &mut stdout);
    let stats = run_ingest(
        &config,
        &source,
        cli.start_line,
        &embedding_client,
        &vector_store,
        &mut log,
    )
    .await?;

    print!("{}", format_ingest_stats(&stats)?);
    println!("Upload complete.");

    Ok(())
}
