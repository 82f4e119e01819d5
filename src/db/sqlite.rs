//! SQLite-backed document store.
//!
//! Every collection lives in one `documents` table; bodies are JSON text queried with `json_extract`.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::store::{Collection, Document, DocumentStore, Filter};
use crate::errors::AppError;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn select(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: Option<i64>,
    ) -> Result<Vec<Document>, AppError> {
        let mut sql = String::from("SELECT body FROM documents WHERE collection = ?");
        for _ in filter.conditions() {
            sql.push_str(" AND json_extract(body, ?) = json_extract(?, '$')");
        }
        sql.push_str(" ORDER BY seq");
        if limit.is_some() {
            sql.push_str(" LIMIT ?");
        }

        let mut query = sqlx::query(&sql).bind(collection.name());
        for (field, value) in filter.conditions() {
            query = query.bind(format!("$.{}", field)).bind(value.to_string());
        }
        if let Some(limit) = limit {
            query = query.bind(limit);
        }

        let rows = query.fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| {
                let body: String = row.get("body");
                serde_json::from_str::<Document>(&body).map_err(AppError::from)
            })
            .collect()
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<String, AppError> {
        let key = collection.key_of(&document)?;
        let body = serde_json::to_string(&document)?;

        let result = sqlx::query("INSERT INTO documents (collection, doc_key, body) VALUES (?, ?, ?)")
            .bind(collection.name())
            .bind(&key)
            .bind(&body)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(key),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::AlreadyExists(format!(
                    "Document '{}' already exists in {}",
                    key,
                    collection.name()
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn upsert(&self, collection: Collection, document: Document) -> Result<String, AppError> {
        let key = collection.key_of(&document)?;
        let body = serde_json::to_string(&document)?;

        sqlx::query(
            r#"INSERT INTO documents (collection, doc_key, body) VALUES (?, ?, ?)
               ON CONFLICT(collection, doc_key) DO UPDATE SET body = excluded.body"#,
        )
        .bind(collection.name())
        .bind(&key)
        .bind(&body)
        .execute(&self.pool)
        .await?;

        Ok(key)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, AppError> {
        Ok(self
            .select(collection, filter, Some(1))
            .await?
            .into_iter()
            .next())
    }

    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, AppError> {
        self.select(collection, filter, None).await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
