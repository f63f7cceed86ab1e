use crate::error::ConfigError;

pub const DEFAULT_EMBEDDING_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_COLLECTION: &str = "jira_issues";
pub const DEFAULT_BATCH_SIZE: usize = 128;

/// Characters of `title + " " + description` sent to the embedding API.
pub const MAX_EMBED_CHARS: usize = 16_000;

pub const ENV_QDRANT_URL: &str = "QDRANT_URL";
pub const ENV_QDRANT_API_KEY: &str = "QDRANT_API_KEY";
pub const ENV_QDRANT_COLLECTION: &str = "QDRANT_COLLECTION";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_EMBED_MODEL: &str = "OPENAI_EMBED_MODEL";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_BATCH_SIZE: &str = "BATCH_SIZE";

/// Run configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub embedding: EmbeddingConfig,
    pub vector_store: VectorStoreConfig,
    pub ingest: IngestConfig,
}

impl Config {
    /// Build the configuration from the process environment, honouring `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; variables may come from the shell.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let url = get(ENV_QDRANT_URL).ok_or(ConfigError::Missing(ENV_QDRANT_URL))?;

        let batch_size = match get(ENV_BATCH_SIZE) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_BATCH_SIZE,
                        value: raw,
                    });
                }
            },
            None => DEFAULT_BATCH_SIZE,
        };

        Ok(Self {
            embedding: EmbeddingConfig {
                url: get(ENV_OPENAI_BASE_URL).unwrap_or_else(default_embedding_url),
                api_key: get(ENV_OPENAI_API_KEY),
                model: get(ENV_OPENAI_EMBED_MODEL).unwrap_or_else(default_model),
            },
            vector_store: VectorStoreConfig {
                url,
                api_key: get(ENV_QDRANT_API_KEY),
                collection: get(ENV_QDRANT_COLLECTION).unwrap_or_else(default_collection),
            },
            ingest: IngestConfig { batch_size },
        })
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub model: String,
}

fn default_embedding_url() -> String {
    DEFAULT_EMBEDDING_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            url: default_embedding_url(),
            api_key: None,
            model: default_model(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VectorStoreConfig {
    pub url: String,
    pub collection: String,
    pub api_key: Option<String>,
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub batch_size: usize,
}
