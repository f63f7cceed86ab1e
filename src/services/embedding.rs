//! Embedding client for generating text embeddings.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::EmbeddingError;
use crate::models::EmbeddingConfig;

/// A service that turns text into a fixed-length vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single piece of text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Request body for the /embeddings endpoint.
#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

/// Response from the /embeddings endpoint.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Debug, Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

/// Client for OpenAI-compatible embedding APIs.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl EmbeddingClient {
    /// Create a new embedding client with the given configuration.
    pub fn new(config: &EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let mut headers = HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
                .map_err(|e| EmbeddingError::ConnectionError(format!("invalid API key: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| EmbeddingError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.url.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = EmbedRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingError::Timeout
                } else if e.is_connect() {
                    EmbeddingError::ConnectionError(e.to_string())
                } else {
                    EmbeddingError::RequestError(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ServerError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        parse_embedding(&body)
    }
}

fn parse_embedding(body: &str) -> Result<Vec<f32>, EmbeddingError> {
    let response: EmbedResponse =
        serde_json::from_str(body).map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;
    response
        .data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .ok_or_else(|| EmbeddingError::InvalidResponse("empty embedding response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = EmbeddingConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let client = EmbeddingClient::new(&config).unwrap();
        assert_eq!(client.model, "text-embedding-3-small");
        assert_eq!(client.endpoint, "https://api.openai.com/v1/embeddings");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = EmbeddingConfig {
            url: "http://localhost:8080/v1/".to_string(),
            ..Default::default()
        };
        let client = EmbeddingClient::new(&config).unwrap();
        assert_eq!(client.endpoint, "http://localhost:8080/v1/embeddings");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let config = EmbeddingConfig {
            api_key: Some("sk-\nbad".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            EmbeddingClient::new(&config),
            Err(EmbeddingError::ConnectionError(_))
        ));
    }

    #[test]
    fn test_request_shape() {
        let request = EmbedRequest {
            model: "text-embedding-3-small",
            input: "Crash on save",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "text-embedding-3-small", "input": "Crash on save"})
        );
    }

    #[test]
    fn test_parse_embedding() {
        let body = r#"{"object":"list","data":[{"object":"embedding","index":0,"embedding":[0.1,-0.2,0.3]}],"model":"text-embedding-3-small","usage":{"prompt_tokens":3,"total_tokens":3}}"#;
        assert_eq!(parse_embedding(body).unwrap(), vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_parse_embedding_errors() {
        assert!(matches!(
            parse_embedding(r#"{"data":[]}"#),
            Err(EmbeddingError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_embedding("not json"),
            Err(EmbeddingError::InvalidResponse(_))
        ));
    }
}
