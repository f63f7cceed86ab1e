//! Qdrant vector store backend implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, UpsertPointsBuilder, Value,
    VectorParamsBuilder,
};

use super::{DistanceMetric, VectorStore};
use crate::error::VectorStoreError;
use crate::models::{FieldValue, UpsertPoint, VectorStoreConfig};

/// Qdrant vector store backend.
pub struct QdrantBackend {
    client: Qdrant,
}

impl QdrantBackend {
    /// Create a new Qdrant backend from configuration.
    pub fn new(config: &VectorStoreConfig) -> Result<Self, VectorStoreError> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(ref api_key) = config.api_key {
            builder = builder.api_key(api_key.clone());
        }

        let client = builder
            .build()
            .map_err(|e| VectorStoreError::ConnectionError(e.to_string()))?;

        Ok(Self { client })
    }
}

impl From<DistanceMetric> for Distance {
    fn from(metric: DistanceMetric) -> Self {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
        }
    }
}

fn to_qdrant_value(value: FieldValue) -> Value {
    match value {
        FieldValue::Null => Value {
            kind: Some(Kind::NullValue(0)),
        },
        FieldValue::Integer(n) => n.into(),
        FieldValue::Float(f) => f.into(),
        FieldValue::Text(s) => s.into(),
    }
}

fn to_point_struct(point: UpsertPoint) -> PointStruct {
    let payload: HashMap<String, Value> = point
        .payload
        .into_iter()
        .map(|(key, value)| (key, to_qdrant_value(value)))
        .collect();
    PointStruct::new(point.id, point.vector, payload)
}

#[async_trait]
impl VectorStore for QdrantBackend {
    async fn recreate_collection(
        &self,
        name: &str,
        dimension: u64,
        distance: DistanceMetric,
    ) -> Result<(), VectorStoreError> {
        let exists = self
            .client
            .collection_exists(name)
            .await
            .map_err(|e| VectorStoreError::ConnectionError(e.to_string()))?;

        if exists {
            self.client
                .delete_collection(name)
                .await
                .map_err(|e| VectorStoreError::CollectionError(e.to_string()))?;
        }

        let create_collection = CreateCollectionBuilder::new(name)
            .vectors_config(VectorParamsBuilder::new(dimension, Distance::from(distance)));

        self.client
            .create_collection(create_collection)
            .await
            .map_err(|e| VectorStoreError::CollectionError(e.to_string()))?;

        Ok(())
    }

    async fn upsert(&self, name: &str, points: Vec<UpsertPoint>) -> Result<(), VectorStoreError> {
        if points.is_empty() {
            return Ok(());
        }

        let points: Vec<PointStruct> = points.into_iter().map(to_point_struct).collect();
        let upsert = UpsertPointsBuilder::new(name, points).wait(true);

        self.client
            .upsert_points(upsert)
            .await
            .map_err(|e| VectorStoreError::UpsertError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::point_id::PointIdOptions;
    use std::collections::BTreeMap;

    #[test]
    fn test_backend_creation() {
        let config = VectorStoreConfig {
            url: "http://localhost:6334".to_string(),
            collection: "jira_issues".to_string(),
            api_key: Some("secret".to_string()),
        };
        assert!(QdrantBackend::new(&config).is_ok());
    }

    #[test]
    fn test_distance_mapping() {
        assert_eq!(Distance::from(DistanceMetric::Cosine), Distance::Cosine);
    }

    #[test]
    fn test_payload_conversion() {
        let mut payload = BTreeMap::new();
        payload.insert("title".to_string(), FieldValue::Text("Crash".to_string()));
        payload.insert("id".to_string(), FieldValue::Float(42.0));
        payload.insert("votes".to_string(), FieldValue::Integer(3));
        payload.insert("resolution".to_string(), FieldValue::Null);

        let point = to_point_struct(UpsertPoint {
            id: 42,
            vector: vec![0.5, 0.25],
            payload,
        });

        assert!(matches!(
            point.id.as_ref().and_then(|id| id.point_id_options.clone()),
            Some(PointIdOptions::Num(42))
        ));
        assert_eq!(
            point.payload.get("title").and_then(|v| v.kind.clone()),
            Some(Kind::StringValue("Crash".to_string()))
        );
        assert_eq!(
            point.payload.get("id").and_then(|v| v.kind.clone()),
            Some(Kind::DoubleValue(42.0))
        );
        assert_eq!(
            point.payload.get("votes").and_then(|v| v.kind.clone()),
            Some(Kind::IntegerValue(3))
        );
        assert_eq!(
            point.payload.get("resolution").and_then(|v| v.kind.clone()),
            Some(Kind::NullValue(0))
        );
    }
}
