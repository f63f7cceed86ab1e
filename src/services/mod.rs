mod batch;
mod embedding;
mod pipeline;
mod vector_store;

pub use batch::Batch;
pub use embedding::{EmbeddingClient, EmbeddingProvider};
pub use pipeline::{IngestStats, RunLog, SkippedRow, run_ingest};
pub use vector_store::{DistanceMetric, QdrantBackend, VectorStore};
