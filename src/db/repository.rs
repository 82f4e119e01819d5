//! Repository for per-entity operations over the document store.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::store::{Collection, Document, DocumentStore, Filter};
use crate::errors::AppError;
use crate::models::{normalize_email, Contribution, Summary, Topic, UserAccount};

/// Data access for topics, contributions, summaries and users.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Close the underlying store.
    pub async fn close(&self) {
        self.store.close().await;
    }

    // ==================== TOPIC OPERATIONS ====================

    /// Persist a new topic.
    pub async fn create_topic(&self, topic: &Topic) -> Result<(), AppError> {
        self.store
            .insert(Collection::Topics, to_document(topic)?)
            .await?;
        Ok(())
    }

    /// List all topics in store order.
    pub async fn list_topics(&self) -> Result<Vec<Topic>, AppError> {
        self.store
            .find_many(Collection::Topics, &Filter::all())
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    /// Get a topic by ID.
    pub async fn get_topic(&self, id: &str) -> Result<Option<Topic>, AppError> {
        self.store
            .find_one(Collection::Topics, &Filter::all().field_eq("id", id))
            .await?
            .map(from_document)
            .transpose()
    }

    // ==================== CONTRIBUTION OPERATIONS ====================

    /// Persist a new contribution.
    pub async fn create_contribution(&self, contribution: &Contribution) -> Result<(), AppError> {
        self.store
            .insert(Collection::Contributions, to_document(contribution)?)
            .await?;
        Ok(())
    }

    /// All contributions of a topic, in store order.
    pub async fn list_topic_contributions(
        &self,
        topic_id: &str,
    ) -> Result<Vec<Contribution>, AppError> {
        self.store
            .find_many(
                Collection::Contributions,
                &Filter::all().field_eq("topic_id", topic_id),
            )
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    // ==================== SUMMARY OPERATIONS ====================

    /// Store a summary, replacing any earlier one for the same topic.
    pub async fn save_summary(&self, summary: &Summary) -> Result<(), AppError> {
        self.store
            .upsert(Collection::Summaries, to_document(summary)?)
            .await?;
        Ok(())
    }

    pub async fn get_summary(&self, topic_id: &str) -> Result<Option<Summary>, AppError> {
        self.store
            .find_one(Collection::Summaries, &Filter::all().field_eq("topic_id", topic_id))
            .await?
            .map(from_document)
            .transpose()
    }

    // ==================== USER OPERATIONS ====================

    /// Create a user keyed by email.
    ///
    /// Fails with `AlreadyExists` if the email is taken; the existing record is left untouched.
    pub async fn create_user(&self, account: &UserAccount) -> Result<UserAccount, AppError> {
        let account = UserAccount {
            email: normalize_email(&account.email),
            ..account.clone()
        };

        match self
            .store
            .insert(Collection::Users, to_document(&account)?)
            .await
        {
            Ok(_) => Ok(account),
            Err(AppError::AlreadyExists(_)) => Err(AppError::AlreadyExists(format!(
                "User with email {} already exists",
                account.email
            ))),
            Err(e) => Err(e),
        }
    }

    /// Get a user by email.
    pub async fn get_user(&self, email: &str) -> Result<Option<UserAccount>, AppError> {
        self.store
            .find_one(
                Collection::Users,
                &Filter::all().field_eq("email", normalize_email(email)),
            )
            .await?
            .map(from_document)
            .transpose()
    }
}

fn to_document<T: Serialize>(record: &T) -> Result<Document, AppError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Internal(format!(
            "Record did not serialize to an object: {}",
            other
        ))),
    }
}

fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, AppError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn repo() -> Repository {
        Repository::new(Arc::new(MemoryStore::new()))
    }

    fn topic(id: &str, title: &str) -> Topic {
        Topic {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            created_at: "2025-02-03T10:00:00.000000Z".to_string(),
        }
    }

    fn contribution(id: &str, topic_id: &str, created_at: &str) -> Contribution {
        Contribution {
            id: id.to_string(),
            topic_id: topic_id.to_string(),
            content: format!("content of {}", id),
            created_at: created_at.to_string(),
            contributor_email: None,
        }
    }

    #[tokio::test]
    async fn test_topic_round_trip() {
        let repo = repo();
        let t = Topic {
            description: Some("about things".to_string()),
            ..topic("t1", "Things")
        };
        repo.create_topic(&t).await.unwrap();

        assert_eq!(repo.get_topic("t1").await.unwrap(), Some(t));
        assert_eq!(repo.get_topic("t2").await.unwrap(), None);
        assert_eq!(repo.list_topics().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_contributions_filtered_by_topic() {
        let repo = repo();
        repo.create_contribution(&contribution("c1", "a", "2025-01-01T00:00:00.000000Z"))
            .await
            .unwrap();
        repo.create_contribution(&contribution("c2", "b", "2025-01-02T00:00:00.000000Z"))
            .await
            .unwrap();
        repo.create_contribution(&contribution("c3", "a", "2025-01-03T00:00:00.000000Z"))
            .await
            .unwrap();

        let for_a = repo.list_topic_contributions("a").await.unwrap();
        let ids: Vec<&str> = for_a.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);
        assert!(repo.list_topic_contributions("z").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summary_latest_wins() {
        let repo = repo();
        assert!(repo.get_summary("t1").await.unwrap().is_none());

        for content in ["first", "second"] {
            repo.save_summary(&Summary {
                topic_id: "t1".to_string(),
                content: content.to_string(),
                generated_at: "2025-02-03T10:00:00.000000Z".to_string(),
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.get_summary("t1").await.unwrap().unwrap().content, "second");
    }

    #[tokio::test]
    async fn test_duplicate_user_rejected() {
        let repo = repo();
        let first = UserAccount {
            email: "Ada@Example.com".to_string(),
            password_hash: "hash-1".to_string(),
            name: "Ada".to_string(),
        };
        let stored = repo.create_user(&first).await.unwrap();
        assert_eq!(stored.email, "ada@example.com");

        let second = UserAccount {
            email: "ada@example.com".to_string(),
            password_hash: "hash-2".to_string(),
            name: "Impostor".to_string(),
        };
        let err = repo.create_user(&second).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));

        let kept = repo.get_user("ADA@example.com").await.unwrap().unwrap();
        assert_eq!(kept.name, "Ada");
        assert_eq!(kept.password_hash, "hash-1");
    }
}
