//! Error types for the Jira ingest pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the input file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("row {row} has {found} fields, header has {expected}")]
    ExtraFields {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid id {value:?} at row {row}")]
    InvalidId { row: usize, value: String },
}

/// Errors related to embedding operations.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("failed to connect to embedding server: {0}")]
    ConnectionError(String),

    #[error("embedding server error: {0}")]
    ServerError(String),

    #[error("embedding request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),

    #[error("embedding timeout")]
    Timeout,

    #[error("embedding has {actual} dimensions, collection expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Errors related to vector store operations.
#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("failed to connect to Qdrant: {0}")]
    ConnectionError(String),

    #[error("collection error: {0}")]
    CollectionError(String),

    #[error("upsert error: {0}")]
    UpsertError(String),
}

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Fatal errors that abort an ingest run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("input contains no data rows")]
    EmptyInput,

    #[error("failed to determine embedding dimension: {0}")]
    Dimension(#[source] EmbeddingError),

    #[error("embedding service returned an empty vector")]
    ZeroDimension,

    #[error("failed to recreate collection: {0}")]
    Collection(#[from] VectorStoreError),
}
