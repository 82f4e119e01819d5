//! Integration tests for the UniNoter backend.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::db::{init_database, MemoryStore, Repository, SqliteStore};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(Arc::new(SqliteStore::new(pool))));

        let app = create_router(AppState { repo });

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create_topic(&self, title: &str) -> Value {
        let resp = self
            .client
            .post(self.url("/api/topics"))
            .json(&json!({ "title": title }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        resp.json().await.unwrap()
    }

    async fn add_contribution(&self, topic_id: &str, content: &str) -> reqwest::Response {
        self.client
            .post(self.url(&format!("/api/topics/{}/contributions", topic_id)))
            .json(&json!({ "content": content }))
            .send()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_health_and_root() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");

    let resp = fixture.client.get(fixture.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "UniNoter API is running");
}

#[tokio::test]
async fn test_topic_create_and_get() {
    let fixture = TestFixture::new().await;
    let before = Utc::now();

    let created = fixture.create_topic("T").await;
    let topic_id = created["id"].as_str().unwrap();

    assert!(!topic_id.is_empty());
    assert_eq!(created["title"], "T");
    assert!(created["description"].is_null());
    let created_at: DateTime<Utc> = created["created_at"].as_str().unwrap().parse().unwrap();
    assert!(created_at >= before);

    // Round trip
    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/topics/{}", topic_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 200);
    let fetched: Value = get_resp.json().await.unwrap();
    assert_eq!(fetched, created);

    // Ids are fresh per topic
    let other = fixture.create_topic("T").await;
    assert_ne!(other["id"], created["id"]);

    let list_resp = fixture
        .client
        .get(fixture.url("/api/topics"))
        .send()
        .await
        .unwrap();
    assert_eq!(list_resp.status(), 200);
    let list: Value = list_resp.json().await.unwrap();
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_topic_with_description() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/topics"))
        .json(&json!({ "title": "Roadmap", "description": "Q3 planning" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["description"], "Q3 planning");
}

#[tokio::test]
async fn test_validation_errors() {
    let fixture = TestFixture::new().await;

    // Blank title
    let resp = fixture
        .client
        .post(fixture.url("/api/topics"))
        .json(&json!({ "title": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // Missing title is rejected by the JSON extractor
    let resp = fixture
        .client
        .post(fixture.url("/api/topics"))
        .json(&json!({ "description": "no title" }))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());

    // Blank contribution
    let topic = fixture.create_topic("Validation").await;
    let resp = fixture
        .add_contribution(topic["id"].as_str().unwrap(), "")
        .await;
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_not_found_errors() {
    let fixture = TestFixture::new().await;

    for path in [
        "/api/topics/unknown-id",
        "/api/topics/unknown-id/contributions",
        "/api/topics/unknown-id/summary",
    ] {
        let resp = fixture.client.get(fixture.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), 404, "GET {}", path);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["detail"], "Topic not found");
    }

    let resp = fixture.add_contribution("unknown-id", "hello").await;
    assert_eq!(resp.status(), 404);

    let resp = fixture
        .client
        .post(fixture.url("/api/topics/unknown-id/generate-summary"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = fixture
        .client
        .post(fixture.url("/api/topics/unknown-id/invite"))
        .json(&json!({ "emails": ["a@example.com"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_contributions_newest_first() {
    let fixture = TestFixture::new().await;
    let topic = fixture.create_topic("Ordering").await;
    let topic_id = topic["id"].as_str().unwrap();

    let mut ids = Vec::new();
    for content in ["first", "second", "third"] {
        let resp = fixture.add_contribution(topic_id, content).await;
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["topic_id"], topic_id);
        assert_eq!(body["content"], content);
        ids.push(body["id"].as_str().unwrap().to_string());
        tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
    }

    // Contribution on another topic must not leak in
    let other = fixture.create_topic("Other").await;
    fixture
        .add_contribution(other["id"].as_str().unwrap(), "elsewhere")
        .await;

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/topics/{}/contributions", topic_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let list: Value = resp.json().await.unwrap();
    let listed: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();

    assert_eq!(listed, vec![ids[2].as_str(), ids[1].as_str(), ids[0].as_str()]);
}

#[tokio::test]
async fn test_summary_lifecycle() {
    let fixture = TestFixture::new().await;
    let topic = fixture.create_topic("Retro").await;
    let topic_id = topic["id"].as_str().unwrap();
    let generate_url = fixture.url(&format!("/api/topics/{}/generate-summary", topic_id));
    let summary_url = fixture.url(&format!("/api/topics/{}/summary", topic_id));

    // No contributions yet
    let resp = fixture.client.post(&generate_url).send().await.unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // Nothing generated yet
    let resp = fixture.client.get(&summary_url).send().await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["detail"], "Summary not found");

    fixture.add_contribution(topic_id, "We shipped on time").await;

    let resp = fixture.client.post(&generate_url).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let generated: Value = resp.json().await.unwrap();
    let content = generated["content"].as_str().unwrap();
    assert_eq!(generated["topic_id"], topic_id);
    assert!(content.starts_with("# Summary Report for Retro"));
    assert!(content.contains("1 contribution received"));
    assert!(content.contains("### Insight 1\nWe shipped on time"));

    fixture
        .add_contribution(topic_id, &"z".repeat(250))
        .await;

    let resp = fixture.client.post(&generate_url).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let regenerated: Value = resp.json().await.unwrap();
    let content = regenerated["content"].as_str().unwrap();
    assert!(content.contains("2 contributions received"));
    assert!(content.contains(&format!("### Insight 2\n{}...\n", "z".repeat(200))));

    // Latest summary is the stored one
    let resp = fixture.client.get(&summary_url).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let stored: Value = resp.json().await.unwrap();
    assert_eq!(stored, regenerated);
}

#[tokio::test]
async fn test_invite_acknowledges() {
    let fixture = TestFixture::new().await;
    let topic = fixture.create_topic("Invites").await;
    let topic_id = topic["id"].as_str().unwrap();
    let url = fixture.url(&format!("/api/topics/{}/invite", topic_id));

    let resp = fixture
        .client
        .post(&url)
        .json(&json!({ "emails": ["a@example.com", "b@example.com"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Invitations sent to 2 users");
    assert_eq!(body["invited_emails"], json!(["a@example.com", "b@example.com"]));
    assert_eq!(body["topic_id"], topic_id);

    let resp = fixture
        .client
        .post(&url)
        .json(&json!({ "emails": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_account_create_and_sign_in() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/auth/create-account"))
        .json(&json!({
            "email": "ada@example.com",
            "password": "analytical-engine",
            "name": "Ada"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["name"], "Ada");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());

    // Duplicate email
    let resp = fixture
        .client
        .post(fixture.url("/auth/create-account"))
        .json(&json!({
            "email": "ADA@example.com",
            "password": "different-secret",
            "name": "Someone Else"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "ALREADY_EXISTS");

    // Original credentials still work
    let resp = fixture
        .client
        .post(fixture.url("/auth/signin"))
        .json(&json!({ "email": "ada@example.com", "password": "analytical-engine" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["user"]["name"], "Ada");

    // The duplicate's password was never stored
    let resp = fixture
        .client
        .post(fixture.url("/auth/signin"))
        .json(&json!({ "email": "ada@example.com", "password": "different-secret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = fixture
        .client
        .post(fixture.url("/auth/signin"))
        .json(&json!({ "email": "nobody@example.com", "password": "whatever-123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_account_validation() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/auth/create-account"))
        .json(&json!({ "email": "short@example.com", "password": "abc" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = fixture
        .client
        .post(fixture.url("/auth/create-account"))
        .json(&json!({ "email": "  ", "password": "long-enough-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_router_with_memory_store() {
    let repo = Arc::new(Repository::new(Arc::new(MemoryStore::new())));
    let app = create_router(AppState { repo });

    let request = Request::builder()
        .method("POST")
        .uri("/api/topics")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "title": "In memory" }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    let topic_id = created["id"].as_str().unwrap();

    let request = Request::builder()
        .uri(format!("/api/topics/{}", topic_id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
