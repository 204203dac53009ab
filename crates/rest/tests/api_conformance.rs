//! Conformance tests for the generated table endpoints.
//!
//! Exercises the full HTTP surface of a registered table: status codes,
//! response bodies, partial update semantics, the mutation guard, and
//! storage fault handling.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_test::TestServer;
use serde_json::{json, Value};

use shelf_rest::{create_api_with_guard, ApiConfig, Catalog};
use shelf_store::{
    ChangeSet, Filter, MemoryTable, RecordKey, RecordPage, StoreError, StoreResult, StoredRecord,
    Table,
};

use common::{create_test_server, seed_note, Note};

// ============================================================================
// Status Code Conformance
// ============================================================================

mod status_codes {
    use super::*;

    #[tokio::test]
    async fn test_list_returns_200_with_page() {
        let (server, notes) = create_test_server();
        seed_note(&notes, "alpha", "First").await;
        seed_note(&notes, "beta", "Second").await;

        let response = server.get("/notes").await;

        response.assert_status_ok();
        let page: Value = response.json();
        assert_eq!(page["page"], 1);
        assert_eq!(page["total"], 2);
        assert_eq!(page["records"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_view_returns_200_with_stored_record() {
        let (server, notes) = create_test_server();
        seed_note(&notes, "alpha", "First").await;

        let response = server.get("/notes/alpha").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["key"], "alpha");
        assert_eq!(body["record"]["title"], "First");
    }

    #[tokio::test]
    async fn test_view_missing_returns_404() {
        let (server, _notes) = create_test_server();

        let response = server.get("/notes/ghost").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"]["kind"], "not_found");
    }

    #[tokio::test]
    async fn test_view_malformed_key_returns_400() {
        let (server, _notes) = create_test_server();

        let response = server.get("/notes/bad!key").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["kind"], "malformed_key");
    }

    #[tokio::test]
    async fn test_view_oversized_key_returns_400() {
        let (server, _notes) = create_test_server();
        let key = "x".repeat(80);

        let response = server.get(&format!("/notes/{key}")).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_returns_200_with_change_set() {
        let (server, _notes) = create_test_server();

        let response = server
            .post("/notes")
            .json(&json!({ "id": "alpha", "title": "First" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["key"], "alpha");
        assert_eq!(body["record"]["title"], "First");
    }

    #[tokio::test]
    async fn test_create_without_id_generates_key() {
        let (server, _notes) = create_test_server();

        let response = server
            .post("/notes")
            .json(&json!({ "title": "Anonymous" }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let key = body["key"].as_str().expect("key should be a string");
        assert_eq!(key.len(), 32);
    }

    #[tokio::test]
    async fn test_create_invalid_record_returns_400_and_stores_nothing() {
        let (server, _notes) = create_test_server();

        let response = server
            .post("/notes")
            .json(&json!({ "id": "alpha", "title": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["kind"], "rejected");

        server.get("/notes/alpha").await.assert_status(StatusCode::NOT_FOUND);
        let listing: Value = server.get("/notes").await.json();
        assert_eq!(listing["total"], 0);
    }

    #[tokio::test]
    async fn test_create_duplicate_key_returns_400() {
        let (server, notes) = create_test_server();
        seed_note(&notes, "alpha", "First").await;

        let response = server
            .post("/notes")
            .json(&json!({ "id": "alpha", "title": "Again" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["kind"], "rejected");
    }

    #[tokio::test]
    async fn test_create_malformed_body_returns_400() {
        let (server, _notes) = create_test_server();

        let response = server
            .post("/notes")
            .text("this is not json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["kind"], "malformed_body");
    }

    #[tokio::test]
    async fn test_update_returns_200_with_empty_body() {
        let (server, notes) = create_test_server();
        seed_note(&notes, "alpha", "First").await;

        let response = server
            .put("/notes/alpha")
            .json(&json!({ "title": "Renamed" }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "");
    }

    #[tokio::test]
    async fn test_update_missing_returns_404() {
        let (server, _notes) = create_test_server();

        let response = server
            .put("/notes/ghost")
            .json(&json!({ "title": "Renamed" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"]["kind"], "not_found");
    }

    #[tokio::test]
    async fn test_update_malformed_body_returns_400() {
        let (server, notes) = create_test_server();
        seed_note(&notes, "alpha", "First").await;

        let response = server.put("/notes/alpha").text("{ broken").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["kind"], "malformed_body");
    }

    #[tokio::test]
    async fn test_delete_returns_200_with_completed_body() {
        let (server, notes) = create_test_server();
        seed_note(&notes, "alpha", "First").await;

        let response = server.delete("/notes/alpha").await;

        response.assert_status_ok();
        assert_eq!(response.json::<String>(), "Completed");
    }

    #[tokio::test]
    async fn test_delete_missing_returns_500() {
        let (server, _notes) = create_test_server();

        let response = server.delete("/notes/ghost").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"]["kind"], "storage_failure");
    }

    #[tokio::test]
    async fn test_deleted_record_is_gone() {
        let (server, notes) = create_test_server();
        seed_note(&notes, "alpha", "First").await;

        server.delete("/notes/alpha").await.assert_status_ok();
        server.get("/notes/alpha").await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unregistered_table_returns_404() {
        let (server, _notes) = create_test_server();

        server.get("/gadgets").await.assert_status(StatusCode::NOT_FOUND);
    }
}

// ============================================================================
// Partial Update Semantics
// ============================================================================

mod partial_updates {
    use super::*;

    #[tokio::test]
    async fn test_update_preserves_unmentioned_fields() {
        let (server, notes) = create_test_server();
        notes
            .create(json!({
                "id": "alpha",
                "title": "First",
                "body": "Keep me around",
                "pinned": true
            }))
            .await
            .expect("Failed to seed note");

        let response = server
            .put("/notes/alpha")
            .json(&json!({ "title": "Renamed" }))
            .await;
        response.assert_status_ok();

        let body: Value = server.get("/notes/alpha").await.json();
        assert_eq!(body["record"]["title"], "Renamed");
        assert_eq!(body["record"]["body"], "Keep me around");
        assert_eq!(body["record"]["pinned"], true);
    }

    #[tokio::test]
    async fn test_update_can_change_several_fields_at_once() {
        let (server, notes) = create_test_server();
        seed_note(&notes, "alpha", "First").await;

        let response = server
            .put("/notes/alpha")
            .json(&json!({ "title": "Renamed", "pinned": true }))
            .await;
        response.assert_status_ok();

        let body: Value = server.get("/notes/alpha").await.json();
        assert_eq!(body["record"]["title"], "Renamed");
        assert_eq!(body["record"]["pinned"], true);
    }
}

// ============================================================================
// Mutation Guard
// ============================================================================

mod mutation_guard {
    use super::*;

    /// Builds a server whose mutating routes demand a bearer token.
    fn guarded_server() -> (TestServer, Arc<MemoryTable<Note>>) {
        let notes = Arc::new(MemoryTable::<Note>::ephemeral("notes"));

        let mut catalog = Catalog::default();
        catalog
            .register(Arc::clone(&notes) as Arc<dyn Table>)
            .expect("Failed to register notes table");

        let guard = axum::middleware::from_fn(
            |request: axum::extract::Request, next: axum::middleware::Next| async move {
                let authorized = request
                    .headers()
                    .get(axum::http::header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    == Some("Bearer sesame");
                if authorized {
                    next.run(request).await
                } else {
                    StatusCode::UNAUTHORIZED.into_response()
                }
            },
        );

        let app = create_api_with_guard(catalog, ApiConfig::for_testing(), guard);
        let server = TestServer::new(app).expect("Failed to create test server");

        (server, notes)
    }

    #[tokio::test]
    async fn test_reads_stay_open() {
        let (server, notes) = guarded_server();
        seed_note(&notes, "alpha", "First").await;

        server.get("/notes").await.assert_status_ok();
        server.get("/notes/alpha").await.assert_status_ok();
        server.get("/search/notes/A10/e30").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_mutations_without_token_are_rejected() {
        let (server, notes) = guarded_server();
        seed_note(&notes, "alpha", "First").await;

        let response = server
            .post("/notes")
            .json(&json!({ "id": "beta", "title": "Second" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let response = server
            .put("/notes/alpha")
            .json(&json!({ "title": "Renamed" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let response = server.delete("/notes/alpha").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_mutations_with_token_pass_through() {
        let (server, _notes) = guarded_server();

        let response = server
            .post("/notes")
            .add_header(
                "Authorization".parse::<axum::http::HeaderName>().unwrap(),
                "Bearer sesame".parse::<axum::http::HeaderValue>().unwrap(),
            )
            .json(&json!({ "id": "alpha", "title": "First" }))
            .await;
        response.assert_status_ok();

        let response = server
            .delete("/notes/alpha")
            .add_header(
                "Authorization".parse::<axum::http::HeaderName>().unwrap(),
                "Bearer sesame".parse::<axum::http::HeaderValue>().unwrap(),
            )
            .await;
        response.assert_status_ok();
    }
}

// ============================================================================
// Storage Fault Handling
// ============================================================================

mod storage_faults {
    use super::*;

    /// Table double whose commits always fail, as if the snapshot target
    /// sat on a read-only filesystem.
    struct UnwritableTable {
        inner: MemoryTable<Note>,
    }

    #[async_trait]
    impl Table for UnwritableTable {
        fn name(&self) -> &str {
            self.inner.name()
        }

        async fn find(&self, page: usize, size: usize, filter: Filter) -> StoreResult<RecordPage> {
            self.inner.find(page, size, filter).await
        }

        async fn find_by_key(&self, key: &RecordKey) -> StoreResult<StoredRecord> {
            self.inner.find_by_key(key).await
        }

        async fn create(&self, record: Value) -> StoreResult<ChangeSet> {
            self.inner.create(record).await
        }

        async fn update(&self, key: &RecordKey, record: Value) -> StoreResult<()> {
            self.inner.update(key, record).await
        }

        async fn delete(&self, key: &RecordKey) -> StoreResult<()> {
            self.inner.delete(key).await
        }

        async fn commit(&self) -> StoreResult<()> {
            Err(StoreError::Commit {
                table: self.inner.name().to_string(),
                reason: "read-only filesystem".to_string(),
            })
        }

        fn decode_record(&self, bytes: &[u8]) -> StoreResult<Value> {
            self.inner.decode_record(bytes)
        }

        fn decode_filter(&self, bytes: &[u8]) -> StoreResult<Filter> {
            self.inner.decode_filter(bytes)
        }

        fn merge(&self, current: Value, incoming: Value) -> StoreResult<Value> {
            self.inner.merge(current, incoming)
        }
    }

    async fn unwritable_server() -> TestServer {
        let table = Arc::new(UnwritableTable {
            inner: MemoryTable::ephemeral("notes"),
        });
        table
            .inner
            .create(json!({ "id": "alpha", "title": "First" }))
            .await
            .expect("Failed to seed note");

        let mut catalog = Catalog::default();
        catalog
            .register(table as Arc<dyn Table>)
            .expect("Failed to register notes table");

        let app = shelf_rest::create_api(catalog, ApiConfig::for_testing());
        TestServer::new(app).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn test_create_commit_failure_returns_500() {
        let server = unwritable_server().await;

        let response = server
            .post("/notes")
            .json(&json!({ "id": "beta", "title": "Second" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"]["kind"], "commit_failure");
    }

    #[tokio::test]
    async fn test_update_commit_failure_returns_500() {
        let server = unwritable_server().await;

        let response = server
            .put("/notes/alpha")
            .json(&json!({ "title": "Renamed" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"]["kind"], "commit_failure");
    }

    #[tokio::test]
    async fn test_delete_commit_failure_returns_500() {
        let server = unwritable_server().await;

        let response = server.delete("/notes/alpha").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"]["kind"], "commit_failure");
    }

    #[tokio::test]
    async fn test_reads_still_work_when_commits_fail() {
        let server = unwritable_server().await;

        server.get("/notes/alpha").await.assert_status_ok();
    }
}
