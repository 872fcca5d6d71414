//! Qdrant-backed vector index.

use async_trait::async_trait;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, DeletePointsBuilder, Distance, PointId, PointStruct, PointsIdsList,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant, QdrantError};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::config::QdrantConfig;
use crate::embeddings::provider::{EmbedError, Embeddings};

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbedError),

    #[error("vector store error: {0}")]
    Store(#[from] QdrantError),
}

/// A named collection of vectors with attached metadata.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Embed and store `texts`, each tagged with the same `metadata`.
    /// Returns the newly assigned vector IDs, one per text.
    async fn add_texts(
        &self,
        collection: &str,
        texts: &[String],
        metadata: &Map<String, Value>,
    ) -> Result<Vec<String>, IndexError>;

    async fn delete(&self, collection: &str, ids: &[String]) -> Result<(), IndexError>;
}

pub struct QdrantIndex {
    client: Qdrant,
    embedder: Embeddings,
    vector_size: u64,
}

impl QdrantIndex {
    pub fn connect(
        config: &QdrantConfig,
        embedder: Embeddings,
        vector_size: u64,
    ) -> Result<Self, IndexError> {
        let mut builder = Qdrant::from_url(&config.url);
        if let Some(api_key) = &config.api_key {
            builder = builder.api_key(api_key.clone());
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            embedder,
            vector_size,
        })
    }

    async fn ensure_collection(&self, name: &str) -> Result<(), QdrantError> {
        if !self.client.collection_exists(name).await? {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(name).vectors_config(VectorParamsBuilder::new(
                        self.vector_size,
                        Distance::Cosine,
                    )),
                )
                .await?;
            info!(collection = name, size = self.vector_size, "created vector collection");
        }
        Ok(())
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn add_texts(
        &self,
        collection: &str,
        texts: &[String],
        metadata: &Map<String, Value>,
    ) -> Result<Vec<String>, IndexError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        self.ensure_collection(collection).await?;

        let vectors = self.embedder.embed(texts).await?;

        let mut ids = Vec::with_capacity(texts.len());
        let mut points = Vec::with_capacity(texts.len());
        for (text, vector) in texts.iter().zip(vectors) {
            let id = Uuid::new_v4().to_string();
            let mut fields = metadata.clone();
            fields.insert("page_content".to_string(), Value::String(text.clone()));
            let payload = Payload::try_from(Value::Object(fields))?;
            points.push(PointStruct::new(id.clone(), vector, payload));
            ids.push(id);
        }

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, points))
            .await?;

        Ok(ids)
    }

    async fn delete(&self, collection: &str, ids: &[String]) -> Result<(), IndexError> {
        let ids: Vec<PointId> = ids.iter().map(|id| PointId::from(id.clone())).collect();

        self.client
            .delete_points(DeletePointsBuilder::new(collection).points(PointsIdsList { ids }))
            .await?;

        Ok(())
    }
}
