//! The ingest driver: size the collection, recreate it, then embed and upsert row by row.

use std::io::Write;
use std::time::Instant;

use indicatif::ProgressBar;

use crate::error::{EmbeddingError, IngestError};
use crate::models::{Config, MAX_EMBED_CHARS, Record, UpsertPoint};
use crate::services::{Batch, DistanceMetric, EmbeddingProvider, VectorStore};
use crate::sources::CsvSource;

/// A row that was dropped because its embedding failed.
#[derive(Debug, Clone)]
pub struct SkippedRow {
    pub index: usize,
    pub id: Option<u64>,
    pub reason: String,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default)]
pub struct IngestStats {
    pub rows_total: usize,
    pub start_line: usize,
    pub rows_attempted: usize,
    pub rows_embedded: usize,
    pub skipped: Vec<SkippedRow>,
    pub upsert_calls: usize,
    pub points_upserted: usize,
    pub batches_failed: usize,
    pub points_dropped: usize,
    pub dimension: usize,
    pub duration_ms: u64,
}

/// Line-oriented run log that writes around the progress bar.
///
/// Lines always reach `out`, whether or not the bar is being drawn.
pub struct RunLog<'a> {
    progress: &'a ProgressBar,
    out: &'a mut dyn Write,
}

impl<'a> RunLog<'a> {
    pub fn new(progress: &'a ProgressBar, out: &'a mut dyn Write) -> Self {
        Self { progress, out }
    }

    pub fn progress(&self) -> &ProgressBar {
        self.progress
    }

    /// Write one line. A failed write never aborts the run.
    pub fn line(&mut self, message: &str) {
        let out = &mut self.out;
        self.progress.suspend(|| {
            let _ = writeln!(out, "{message}");
        });
    }
}

/// Run one full ingest over `source`, starting at row `start_line`.
///
/// The collection is dropped and recreated before any point is written. Its
/// dimension comes from embedding row 0, whatever `start_line` is. Row-level
/// embedding failures and batch-level upsert failures are written to `log`
/// and counted; neither is retried.
pub async fn run_ingest(
    config: &Config,
    source: &CsvSource,
    start_line: usize,
    embedder: &dyn EmbeddingProvider,
    store: &dyn VectorStore,
    log: &mut RunLog<'_>,
) -> Result<IngestStats, IngestError> {
    let start_time = Instant::now();
    let collection = config.vector_store.collection.as_str();

    let first = source.first().ok_or(IngestError::EmptyInput)?;
    let dimension = embedder
        .embed(&first.embedding_text(MAX_EMBED_CHARS))
        .await
        .map_err(IngestError::Dimension)?
        .len();
    if dimension == 0 {
        return Err(IngestError::ZeroDimension);
    }

    store
        .recreate_collection(collection, dimension as u64, DistanceMetric::Cosine)
        .await?;
    log.line(&format!(
        "Recreated collection '{}' (size {}, {})",
        collection,
        dimension,
        DistanceMetric::Cosine
    ));

    let rows = source.rows_from(start_line);
    if start_line > source.len() {
        log.line(&format!(
            "Start line {} is past the last row ({}); nothing to upload",
            start_line,
            source.len()
        ));
    }

    let mut stats = IngestStats {
        rows_total: source.len(),
        start_line,
        dimension,
        ..Default::default()
    };

    log.progress().set_length(rows.len() as u64);
    let mut batch = Batch::new(config.ingest.batch_size);

    for record in rows {
        log.progress().inc(1);
        stats.rows_attempted += 1;

        let vector = match embed_record(embedder, record, dimension).await {
            Ok(v) => v,
            Err(e) => {
                log.line(&format!(
                    "Skipping row {} due to embedding error: {}",
                    record.label(),
                    e
                ));
                stats.skipped.push(SkippedRow {
                    index: record.index,
                    id: record.id,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        stats.rows_embedded += 1;

        if batch.push(record.index, UpsertPoint::from_record(record, vector)) {
            flush(store, collection, &mut batch, &mut stats, log).await;
        }
    }

    if !batch.is_empty() {
        flush(store, collection, &mut batch, &mut stats, log).await;
    }

    log.progress().finish_and_clear();
    stats.duration_ms = start_time.elapsed().as_millis() as u64;
    Ok(stats)
}

async fn embed_record(
    embedder: &dyn EmbeddingProvider,
    record: &Record,
    dimension: usize,
) -> Result<Vec<f32>, EmbeddingError> {
    let vector = embedder
        .embed(&record.embedding_text(MAX_EMBED_CHARS))
        .await?;
    if vector.len() != dimension {
        return Err(EmbeddingError::DimensionMismatch {
            expected: dimension,
            actual: vector.len(),
        });
    }
    Ok(vector)
}

async fn flush(
    store: &dyn VectorStore,
    collection: &str,
    batch: &mut Batch,
    stats: &mut IngestStats,
    log: &mut RunLog<'_>,
) {
    let first_row = batch.first_row().unwrap_or_default();
    let points = batch.take();
    let count = points.len();

    stats.upsert_calls += 1;
    match store.upsert(collection, points).await {
        Ok(()) => stats.points_upserted += count,
        Err(e) => {
            log.line(&format!(
                "Upsert failed for batch of {} starting at row {}: {}",
                count, first_row, e
            ));
            stats.batches_failed += 1;
            stats.points_dropped += count;
        }
    }
}
