//! pgvector (PostgreSQL) vector store backend.
//!
//! [`PgVectorStore`] implements [`VectorStore`] with
//! [sqlx](https://docs.rs/sqlx) against PostgreSQL with the
//! [pgvector](https://github.com/pgvector/pgvector) extension.
//!
//! Each collection is a table with columns `id`, `content`,
//! `embedding` (vector), and `metadata` (jsonb). The `vector` extension is
//! created on first use if the connected role is allowed to.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::document::{Metadata, SearchResult, StoredRecord};
use crate::error::{RagError, Result};
use crate::store::VectorStore;

/// A [`VectorStore`] backed by PostgreSQL with the pgvector extension.
pub struct PgVectorStore {
    pool: PgPool,
}

impl PgVectorStore {
    /// Connect to the given database URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(Self::map_err)?;
        Ok(Self { pool })
    }

    /// Create a store from an existing connection pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_err(e: sqlx::Error) -> RagError {
        RagError::VectorStore { backend: "pgvector".to_string(), message: e.to_string() }
    }

    /// Sanitize a collection name into a table name. Only alphanumerics
    /// and underscores survive; everything else becomes an underscore.
    fn table_name(collection: &str) -> Result<String> {
        let sanitized: String = collection
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        if sanitized.is_empty() {
            return Err(RagError::VectorStore {
                backend: "pgvector".to_string(),
                message: "collection name is empty after sanitization".to_string(),
            });
        }
        Ok(format!("docqa_{sanitized}"))
    }

    /// Render an embedding in pgvector's text format: `[1,2,3]`.
    fn vector_literal(embedding: &[f32]) -> String {
        format!(
            "[{}]",
            embedding.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
        )
    }
}

#[async_trait]
impl VectorStore for PgVectorStore {
    async fn ensure_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        let table = Self::table_name(name)?;

        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await
            .map_err(Self::map_err)?;

        let create_sql = format!(
            "CREATE TABLE IF NOT EXISTS {table} (\
                id TEXT PRIMARY KEY, \
                content TEXT NOT NULL, \
                embedding vector({dimensions}), \
                metadata JSONB NOT NULL DEFAULT '{{}}'::jsonb\
            )"
        );
        sqlx::query(&create_sql).execute(&self.pool).await.map_err(Self::map_err)?;

        debug!(collection = name, table = %table, dimensions, "ensured pgvector table");
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[StoredRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let table = Self::table_name(collection)?;

        let upsert_sql = format!(
            "INSERT INTO {table} (id, content, embedding, metadata) \
             VALUES ($1, $2, $3::vector, $4::jsonb) \
             ON CONFLICT (id) DO UPDATE SET \
                content = EXCLUDED.content, \
                embedding = EXCLUDED.embedding, \
                metadata = EXCLUDED.metadata"
        );

        for record in records {
            let metadata_json =
                serde_json::to_string(&record.metadata).unwrap_or_else(|_| "{}".to_string());

            sqlx::query(&upsert_sql)
                .bind(&record.id)
                .bind(&record.content)
                .bind(Self::vector_literal(&record.embedding))
                .bind(&metadata_json)
                .execute(&self.pool)
                .await
                .map_err(Self::map_err)?;
        }

        debug!(collection, count = records.len(), "upserted records to pgvector");
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        let table = Self::table_name(collection)?;

        // Cosine distance operator <=> returns 0 for identical vectors,
        // so similarity = 1 - distance.
        let search_sql = format!(
            "SELECT id, content, metadata, \
                    1 - (embedding <=> $1::vector) AS score \
             FROM {table} \
             ORDER BY embedding <=> $1::vector \
             LIMIT $2"
        );

        let rows = sqlx::query(&search_sql)
            .bind(Self::vector_literal(embedding))
            .bind(top_k as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(Self::map_err)?;

        let results = rows
            .iter()
            .map(|row| {
                let id: String = row.get("id");
                let content: String = row.get("content");
                let score: f64 = row.get("score");
                let metadata_value: serde_json::Value = row.get("metadata");
                let metadata: Metadata = metadata_value
                    .as_object()
                    .map(|obj| {
                        obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
                    })
                    .unwrap_or_else(HashMap::new);

                SearchResult {
                    record: StoredRecord { id, content, metadata, embedding: Vec::new() },
                    score: score as f32,
                }
            })
            .collect();

        Ok(results)
    }
}
