mod config;
mod record;

pub use config::{
    Config, DEFAULT_BATCH_SIZE, DEFAULT_COLLECTION, DEFAULT_EMBEDDING_MODEL,
    DEFAULT_EMBEDDING_URL, EmbeddingConfig, IngestConfig, MAX_EMBED_CHARS, VectorStoreConfig,
};
pub use record::{
    DESCRIPTION_COLUMN, FieldValue, ID_COLUMN, Record, TITLE_COLUMN, UpsertPoint,
};
