//! Document store adapter.
//!
//! One JSONB table per logical collection, with open filter maps mapped
//! onto containment queries (`doc @> filters`). The surrogate `id`
//! column is the store's internal identity and never appears in
//! returned documents.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{Map, Value};
use sqlx::PgPool;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid collection name: {0}")]
    InvalidCollection(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct InsertOutcome {
    pub inserted_id: i64,
    pub acknowledged: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    pub acknowledged: bool,
}

#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
    pub acknowledged: bool,
}

/// JSONB-backed document collections under a single schema.
///
/// Tables are created on first use behind a guarded check-and-set, so
/// collections come into existence on first write just like in a
/// schemaless document database.
#[derive(Clone)]
pub struct DocumentStore {
    pool: PgPool,
    schema: String,
    ready: Arc<Mutex<HashSet<String>>>,
}

impl DocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_schema(pool, "public")
    }

    pub fn with_schema(pool: PgPool, schema: &str) -> Self {
        Self {
            pool,
            schema: schema.to_string(),
            ready: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    fn qualified(&self, collection: &str) -> Result<String, StoreError> {
        if !valid_ident(&self.schema) {
            return Err(StoreError::InvalidCollection(self.schema.clone()));
        }
        if !valid_ident(collection) {
            return Err(StoreError::InvalidCollection(collection.to_string()));
        }
        Ok(format!("{}.{}", self.schema, collection))
    }

    async fn ensure(&self, collection: &str) -> Result<String, StoreError> {
        let table = self.qualified(collection)?;

        {
            let ready = self.ready.lock().await;
            if ready.contains(collection) {
                return Ok(table);
            }
        }

        if self.schema != "public" {
            sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", self.schema))
                .execute(&self.pool)
                .await?;
        }
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (id BIGSERIAL PRIMARY KEY, doc JSONB NOT NULL)"
        ))
        .execute(&self.pool)
        .await?;
        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS {}_{}_doc_idx ON {table} USING GIN (doc jsonb_path_ops)",
            self.schema, collection
        ))
        .execute(&self.pool)
        .await?;

        self.ready.lock().await.insert(collection.to_string());
        Ok(table)
    }

    pub async fn insert(
        &self,
        collection: &str,
        doc: &Map<String, Value>,
    ) -> Result<InsertOutcome, StoreError> {
        let table = self.ensure(collection).await?;

        let id: i64 = sqlx::query_scalar(&format!(
            "INSERT INTO {table} (doc) VALUES ($1) RETURNING id"
        ))
        .bind(Value::Object(doc.clone()))
        .fetch_one(&self.pool)
        .await?;

        info!(collection, id, "created document");
        Ok(InsertOutcome {
            inserted_id: id,
            acknowledged: true,
        })
    }

    pub async fn get_one(
        &self,
        collection: &str,
        filters: &Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        let table = self.ensure(collection).await?;

        let doc: Option<Value> = sqlx::query_scalar(&format!(
            "SELECT doc FROM {table} WHERE doc @> $1 ORDER BY id LIMIT 1"
        ))
        .bind(Value::Object(filters.clone()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(doc)
    }

    pub async fn get_many(
        &self,
        collection: &str,
        filters: &Map<String, Value>,
        offset: i64,
        limit: Option<i64>,
    ) -> Result<Vec<Value>, StoreError> {
        let table = self.ensure(collection).await?;

        let mut sql =
            format!("SELECT doc FROM {table} WHERE doc @> $1 ORDER BY id OFFSET $2");
        if limit.is_some() {
            sql.push_str(" LIMIT $3");
        }

        let mut query = sqlx::query_scalar(&sql)
            .bind(Value::Object(filters.clone()))
            .bind(offset);
        if let Some(limit) = limit {
            query = query.bind(limit);
        }

        let docs: Vec<Value> = query.fetch_all(&self.pool).await?;
        info!(
            collection,
            count = docs.len(),
            offset,
            ?limit,
            "retrieved documents"
        );
        Ok(docs)
    }

    /// Merge `changes` into every document matching `filters`.
    ///
    /// A row counts as modified only when the merge would change it,
    /// mirroring the matched/modified split of document-store drivers.
    pub async fn update(
        &self,
        collection: &str,
        filters: &Map<String, Value>,
        changes: &Map<String, Value>,
    ) -> Result<UpdateOutcome, StoreError> {
        let table = self.ensure(collection).await?;

        let matched: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {table} WHERE doc @> $1"
        ))
        .bind(Value::Object(filters.clone()))
        .fetch_one(&self.pool)
        .await?;

        let result = sqlx::query(&format!(
            "UPDATE {table} SET doc = doc || $2 WHERE doc @> $1 AND NOT (doc @> $2)"
        ))
        .bind(Value::Object(filters.clone()))
        .bind(Value::Object(changes.clone()))
        .execute(&self.pool)
        .await?;

        if matched == 0 {
            warn!(collection, "no documents matched update filters");
        } else {
            info!(
                collection,
                matched,
                modified = result.rows_affected(),
                "updated documents"
            );
        }
        Ok(UpdateOutcome {
            matched_count: matched as u64,
            modified_count: result.rows_affected(),
            acknowledged: true,
        })
    }

    pub async fn delete(
        &self,
        collection: &str,
        filters: &Map<String, Value>,
    ) -> Result<DeleteOutcome, StoreError> {
        let table = self.ensure(collection).await?;

        let result = sqlx::query(&format!("DELETE FROM {table} WHERE doc @> $1"))
            .bind(Value::Object(filters.clone()))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            warn!(collection, "no documents matched delete filters");
        } else {
            info!(
                collection,
                deleted = result.rows_affected(),
                "deleted documents"
            );
        }
        Ok(DeleteOutcome {
            deleted_count: result.rows_affected(),
            acknowledged: true,
        })
    }

    pub async fn count(
        &self,
        collection: &str,
        filters: &Map<String, Value>,
    ) -> Result<i64, StoreError> {
        let table = self.ensure(collection).await?;

        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {table} WHERE doc @> $1"
        ))
        .bind(Value::Object(filters.clone()))
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

/// Collection and schema names are interpolated into SQL, so they must
/// be plain lowercase identifiers. Names come from configuration, never
/// from request payloads.
fn valid_ident(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 63
        && name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(valid_ident("universities"));
        assert!(valid_ident("vec_scholarships"));
        assert!(valid_ident("_joiner"));
        assert!(valid_ident("student_profiles2"));
    }

    #[test]
    fn rejects_unsafe_identifiers() {
        assert!(!valid_ident(""));
        assert!(!valid_ident("Universities"));
        assert!(!valid_ident("users; DROP TABLE users"));
        assert!(!valid_ident("1users"));
        assert!(!valid_ident("users-table"));
        assert!(!valid_ident(&"x".repeat(64)));
    }
}
