//! Keeps the vector index in sync with the document store.
//!
//! For every indexed record the join table holds one entry carrying the
//! record's metadata plus `qids`, the vector IDs of its chunks. Deletes
//! reverse-map record filters to vector IDs through that entry.
//!
//! The two writes in `insert` and `delete` are not transactional and
//! there is no cleanup on partial failure: a failed join write leaves
//! orphaned vectors, a failed join delete leaves a dangling entry. The
//! error variants name the phase that failed so callers can tell the
//! partial states apart.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::db::{DocumentStore, StoreError};
use crate::embeddings::chunker::TextChunker;
use crate::embeddings::provider::EmbedError;
use crate::embeddings::vector_store::{IndexError, VectorIndex};

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("embedding failed: {0}")]
    Embedding(#[source] EmbedError),

    #[error("vector index error: {0}")]
    VectorIndex(#[source] IndexError),

    #[error("join table error: {0}")]
    JoinTable(#[from] StoreError),
}

impl From<IndexError> for SyncError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::Embedding(err) => SyncError::Embedding(err),
            other => SyncError::VectorIndex(other),
        }
    }
}

/// Join-table storage: one entry per indexed record.
#[async_trait]
pub trait JoinTable: Send + Sync {
    async fn insert(&self, collection: &str, entry: &Map<String, Value>)
        -> Result<(), StoreError>;

    async fn find(
        &self,
        collection: &str,
        filters: &Map<String, Value>,
    ) -> Result<Vec<Value>, StoreError>;

    async fn delete(
        &self,
        collection: &str,
        filters: &Map<String, Value>,
    ) -> Result<u64, StoreError>;
}

#[async_trait]
impl JoinTable for DocumentStore {
    async fn insert(
        &self,
        collection: &str,
        entry: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        DocumentStore::insert(self, collection, entry).await?;
        Ok(())
    }

    async fn find(
        &self,
        collection: &str,
        filters: &Map<String, Value>,
    ) -> Result<Vec<Value>, StoreError> {
        DocumentStore::get_many(self, collection, filters, 0, None).await
    }

    async fn delete(
        &self,
        collection: &str,
        filters: &Map<String, Value>,
    ) -> Result<u64, StoreError> {
        let outcome = DocumentStore::delete(self, collection, filters).await?;
        Ok(outcome.deleted_count)
    }
}

/// Mirrors records into the vector index: chunk, embed, store, and
/// record the resulting vector IDs against the source record.
pub struct SearchSync {
    index: Box<dyn VectorIndex>,
    joiner: Box<dyn JoinTable>,
    chunker: TextChunker,
}

impl SearchSync {
    pub fn new(
        index: Box<dyn VectorIndex>,
        joiner: Box<dyn JoinTable>,
        chunker: TextChunker,
    ) -> Self {
        Self {
            index,
            joiner,
            chunker,
        }
    }

    /// Index `text` under `collection` and record a join entry
    /// `{**metadata, "qids": [...]}`. Returns the per-chunk vector IDs.
    pub async fn insert(
        &self,
        collection: &str,
        text: &str,
        metadata: &Map<String, Value>,
    ) -> Result<Vec<String>, SyncError> {
        let chunks = self.chunker.split(text);
        let qids = self.index.add_texts(collection, &chunks, metadata).await?;

        let mut entry = metadata.clone();
        entry.insert(
            "qids".to_string(),
            Value::Array(qids.iter().cloned().map(Value::String).collect()),
        );
        self.joiner.insert(collection, &entry).await?;

        info!(collection, chunks = qids.len(), "added text to vector collection");
        Ok(qids)
    }

    /// Remove every chunk recorded for records matching `filters`.
    ///
    /// Returns `false` when the join table has nothing for the filters;
    /// that says nothing about whether matching records exist in the
    /// document store.
    pub async fn delete(
        &self,
        collection: &str,
        filters: &Map<String, Value>,
    ) -> Result<bool, SyncError> {
        let entries = self.joiner.find(collection, filters).await?;
        let qids: Vec<String> = entries
            .iter()
            .filter_map(|entry| entry.get("qids").and_then(Value::as_array))
            .flatten()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        if qids.is_empty() {
            warn!(collection, "no texts found to delete from vector collection");
            return Ok(false);
        }

        self.index.delete(collection, &qids).await?;
        self.joiner.delete(collection, filters).await?;

        info!(collection, deleted = qids.len(), "deleted texts from vector collection");
        Ok(true)
    }

    /// Delete-then-insert. Not atomic: a failure after the delete
    /// leaves the record unindexed until the next successful write.
    pub async fn update(
        &self,
        collection: &str,
        filters: &Map<String, Value>,
        text: &str,
        metadata: &Map<String, Value>,
    ) -> Result<Vec<String>, SyncError> {
        self.delete(collection, filters).await?;
        let qids = self.insert(collection, text, metadata).await?;

        info!(collection, "updated text in vector collection");
        Ok(qids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory vector index assigning sequential IDs "q1", "q2", ...
    #[derive(Default)]
    struct FakeIndex {
        points: Mutex<HashMap<String, Map<String, Value>>>,
        next_id: AtomicUsize,
        fail_add: AtomicBool,
    }

    #[async_trait]
    impl VectorIndex for FakeIndex {
        async fn add_texts(
            &self,
            _collection: &str,
            texts: &[String],
            metadata: &Map<String, Value>,
        ) -> Result<Vec<String>, IndexError> {
            if self.fail_add.load(Ordering::SeqCst) {
                return Err(IndexError::Embedding(EmbedError::Provider(
                    "embedding backend unavailable".to_string(),
                )));
            }
            let mut points = self.points.lock().unwrap();
            let mut ids = Vec::new();
            for text in texts {
                let id = format!("q{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
                let mut payload = metadata.clone();
                payload.insert("page_content".to_string(), Value::String(text.clone()));
                points.insert(id.clone(), payload);
                ids.push(id);
            }
            Ok(ids)
        }

        async fn delete(&self, _collection: &str, ids: &[String]) -> Result<(), IndexError> {
            let mut points = self.points.lock().unwrap();
            for id in ids {
                points.remove(id);
            }
            Ok(())
        }
    }

    /// In-memory join table with containment-filter semantics.
    #[derive(Default)]
    struct FakeJoinTable {
        entries: Mutex<Vec<Map<String, Value>>>,
        fail_insert: AtomicBool,
    }

    fn matches(entry: &Map<String, Value>, filters: &Map<String, Value>) -> bool {
        filters.iter().all(|(k, v)| entry.get(k) == Some(v))
    }

    #[async_trait]
    impl JoinTable for FakeJoinTable {
        async fn insert(
            &self,
            _collection: &str,
            entry: &Map<String, Value>,
        ) -> Result<(), StoreError> {
            if self.fail_insert.load(Ordering::SeqCst) {
                return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
            }
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }

        async fn find(
            &self,
            _collection: &str,
            filters: &Map<String, Value>,
        ) -> Result<Vec<Value>, StoreError> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|entry| matches(entry, filters))
                .cloned()
                .map(Value::Object)
                .collect())
        }

        async fn delete(
            &self,
            _collection: &str,
            filters: &Map<String, Value>,
        ) -> Result<u64, StoreError> {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|entry| !matches(entry, filters));
            Ok((before - entries.len()) as u64)
        }
    }

    #[async_trait]
    impl VectorIndex for std::sync::Arc<FakeIndex> {
        async fn add_texts(
            &self,
            collection: &str,
            texts: &[String],
            metadata: &Map<String, Value>,
        ) -> Result<Vec<String>, IndexError> {
            self.as_ref().add_texts(collection, texts, metadata).await
        }

        async fn delete(&self, collection: &str, ids: &[String]) -> Result<(), IndexError> {
            self.as_ref().delete(collection, ids).await
        }
    }

    #[async_trait]
    impl JoinTable for std::sync::Arc<FakeJoinTable> {
        async fn insert(
            &self,
            collection: &str,
            entry: &Map<String, Value>,
        ) -> Result<(), StoreError> {
            self.as_ref().insert(collection, entry).await
        }

        async fn find(
            &self,
            collection: &str,
            filters: &Map<String, Value>,
        ) -> Result<Vec<Value>, StoreError> {
            self.as_ref().find(collection, filters).await
        }

        async fn delete(
            &self,
            collection: &str,
            filters: &Map<String, Value>,
        ) -> Result<u64, StoreError> {
            self.as_ref().delete(collection, filters).await
        }
    }

    struct Harness {
        sync: SearchSync,
        index: std::sync::Arc<FakeIndex>,
        joiner: std::sync::Arc<FakeJoinTable>,
    }

    /// Chunk policy of size 6 / overlap 1 so short test strings span
    /// multiple chunks.
    fn harness() -> Harness {
        let index = std::sync::Arc::new(FakeIndex::default());
        let joiner = std::sync::Arc::new(FakeJoinTable::default());
        let sync = SearchSync::new(
            Box::new(index.clone()),
            Box::new(joiner.clone()),
            TextChunker::new(6, 1),
        );
        Harness { sync, index, joiner }
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn insert_records_join_entry_with_returned_ids() {
        let h = harness();
        let metadata = object(json!({"scholarship_id": 7}));

        let qids = h.sync.insert("scholarships", "desc text", &metadata).await.unwrap();

        // "desc text" is 9 chars; size 6 / stride 5 -> 2 chunks
        assert_eq!(qids, vec!["q1".to_string(), "q2".to_string()]);

        let entries = h.joiner.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].get("scholarship_id"), Some(&json!(7)));
        assert_eq!(entries[0].get("qids"), Some(&json!(["q1", "q2"])));

        let points = h.index.points.lock().unwrap();
        assert!(points.contains_key("q1") && points.contains_key("q2"));
        assert_eq!(points["q1"].get("scholarship_id"), Some(&json!(7)));
    }

    #[tokio::test]
    async fn delete_removes_indexed_chunks_and_join_entry() {
        let h = harness();
        let metadata = object(json!({"scholarship_id": 7}));
        h.sync.insert("scholarships", "desc text", &metadata).await.unwrap();

        let filters = object(json!({"scholarship_id": 7}));
        let deleted = h.sync.delete("scholarships", &filters).await.unwrap();

        assert!(deleted);
        assert!(h.index.points.lock().unwrap().is_empty());
        assert!(h.joiner.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_without_match_returns_false_and_mutates_nothing() {
        let h = harness();
        let metadata = object(json!({"scholarship_id": 7}));
        h.sync.insert("scholarships", "desc text", &metadata).await.unwrap();

        let filters = object(json!({"scholarship_id": 999}));
        let deleted = h.sync.delete("scholarships", &filters).await.unwrap();

        assert!(!deleted);
        assert_eq!(h.index.points.lock().unwrap().len(), 2);
        assert_eq!(h.joiner.entries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_issues_fresh_ids_and_replaces_the_entry() {
        let h = harness();
        let metadata = object(json!({"scholarship_id": 7}));
        let old = h.sync.insert("scholarships", "desc text", &metadata).await.unwrap();

        let filters = object(json!({"scholarship_id": 7}));
        let new = h
            .sync
            .update("scholarships", &filters, "brand new text", &metadata)
            .await
            .unwrap();

        assert!(old.iter().all(|id| !new.contains(id)), "vector IDs must not be reused");

        let entries = h.joiner.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        let recorded: Vec<String> = entries[0]["qids"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        assert_eq!(recorded, new);

        let points = h.index.points.lock().unwrap();
        assert!(old.iter().all(|id| !points.contains_key(id)));
        assert!(new.iter().all(|id| points.contains_key(id)));
    }

    #[tokio::test]
    async fn repeated_insert_is_not_idempotent() {
        let h = harness();
        let metadata = object(json!({"scholarship_id": 7}));

        let first = h.sync.insert("scholarships", "desc text", &metadata).await.unwrap();
        let second = h.sync.insert("scholarships", "desc text", &metadata).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(h.joiner.entries.lock().unwrap().len(), 2);
        assert_eq!(h.index.points.lock().unwrap().len(), first.len() + second.len());
    }

    #[tokio::test]
    async fn join_failure_after_vector_write_leaves_orphaned_vectors() {
        let h = harness();
        h.joiner.fail_insert.store(true, Ordering::SeqCst);
        let metadata = object(json!({"scholarship_id": 7}));

        let err = h.sync.insert("scholarships", "desc text", &metadata).await.unwrap_err();

        assert!(matches!(err, SyncError::JoinTable(_)));
        // The vector write already happened; nothing cleans it up.
        assert_eq!(h.index.points.lock().unwrap().len(), 2);
        assert!(h.joiner.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn embedding_failure_surfaces_before_any_write() {
        let h = harness();
        h.index.fail_add.store(true, Ordering::SeqCst);
        let metadata = object(json!({"scholarship_id": 7}));

        let err = h.sync.insert("scholarships", "desc text", &metadata).await.unwrap_err();

        assert!(matches!(err, SyncError::Embedding(_)));
        assert!(h.index.points.lock().unwrap().is_empty());
        assert!(h.joiner.entries.lock().unwrap().is_empty());
    }
}
