//! Vector store abstraction layer.
//!
//! The pipeline only needs two operations from a backend: recreate a
//! collection for a given vector size and upsert batches of points into it.

mod qdrant;

pub use qdrant::QdrantBackend;

use std::fmt;

use async_trait::async_trait;

use crate::error::VectorStoreError;
use crate::models::UpsertPoint;

/// Similarity metric a collection is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMetric {
    Cosine,
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMetric::Cosine => write!(f, "cosine"),
        }
    }
}

/// Abstract trait for vector store operations.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Drop `name` if it exists and create it empty for `dimension`-sized vectors.
    async fn recreate_collection(
        &self,
        name: &str,
        dimension: u64,
        distance: DistanceMetric,
    ) -> Result<(), VectorStoreError>;

    /// Insert or overwrite points by id.
    async fn upsert(&self, name: &str, points: Vec<UpsertPoint>) -> Result<(), VectorStoreError>;
}
