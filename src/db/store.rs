//! Document store abstraction.
//!
//! Records are JSON objects addressed by collection name and field-equality filters.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::AppError;

/// A stored record.
pub type Document = Map<String, Value>;

/// The collections the application keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Topics,
    Contributions,
    Summaries,
    Users,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Topics => "topics",
            Collection::Contributions => "contributions",
            Collection::Summaries => "summaries",
            Collection::Users => "users",
        }
    }

    /// Field holding the document identity. Unique within the collection.
    pub fn key_field(&self) -> &'static str {
        match self {
            Collection::Topics | Collection::Contributions => "id",
            Collection::Summaries => "topic_id",
            Collection::Users => "email",
        }
    }

    /// Extract the identity from a document.
    pub fn key_of(&self, document: &Document) -> Result<String, AppError> {
        match document.get(self.key_field()) {
            Some(Value::String(key)) if !key.is_empty() => Ok(key.clone()),
            _ => Err(AppError::Internal(format!(
                "Document for '{}' is missing string field '{}'",
                self.name(),
                self.key_field()
            ))),
        }
    }
}

/// Conjunction of field equality constraints. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// Filter matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an equality constraint.
    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }
}

/// Backing store for all collections.
///
/// Results come back in insertion order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return its identity.
    ///
    /// Fails with `AlreadyExists` when the identity is taken. The check and the
    /// write are a single atomic step.
    async fn insert(&self, collection: Collection, document: Document) -> Result<String, AppError>;

    /// Insert or replace the document with the same identity.
    async fn upsert(&self, collection: Collection, document: Document) -> Result<String, AppError>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, AppError>;

    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Document>, AppError>;

    /// Release underlying resources. Called once at shutdown.
    async fn close(&self) {}
}
