//! In-process document store.
//!
//! Explicitly constructed and owned by the application state; nothing is shared globally.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{Collection, Document, DocumentStore, Filter};
use crate::errors::AppError;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<String, AppError> {
        let key = collection.key_of(&document)?;
        let mut guard = self.collections.write().await;
        let docs = guard.entry(collection).or_default();

        // Uniqueness is checked under the same write lock as the push.
        if docs
            .iter()
            .any(|d| collection.key_of(d).ok().as_deref() == Some(key.as_str()))
        {
            return Err(AppError::AlreadyExists(format!(
                "Document '{}' already exists in {}",
                key,
                collection.name()
            )));
        }

        docs.push(document);
        Ok(key)
    }

    async fn upsert(&self, collection: Collection, document: Document) -> Result<String, AppError> {
        let key = collection.key_of(&document)?;
        let mut guard = self.collections.write().await;
        let docs = guard.entry(collection).or_default();

        match docs
            .iter_mut()
            .find(|d| collection.key_of(d).ok().as_deref() == Some(key.as_str()))
        {
            Some(existing) => *existing = document,
            None => docs.push(document),
        }
        Ok(key)
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, AppError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, AppError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }
}
