//! Shared fixtures for the REST integration tests.
//!
//! Provides the [`Note`] record type and a [`create_test_server`] helper
//! that wires a single ephemeral `notes` table into a test server.

use std::sync::Arc;

use axum_test::TestServer;
use serde::{Deserialize, Serialize};
use serde_json::json;

use shelf_rest::{create_api, ApiConfig, Catalog};
use shelf_store::{InvalidRecord, MemoryTable, Record, RecordKey, Table};

/// Record type exercised by the integration tests.
///
/// `id` doubles as the record key when present; notes posted without
/// one get a generated key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: String,
    pub pinned: bool,
}

impl Record for Note {
    fn natural_key(&self) -> Option<RecordKey> {
        if self.id.is_empty() {
            None
        } else {
            self.id.parse().ok()
        }
    }

    fn validate(&self) -> Result<(), InvalidRecord> {
        if self.title.is_empty() {
            return Err(InvalidRecord::new("note title must not be empty"));
        }
        if !self.id.is_empty() && self.id.parse::<RecordKey>().is_err() {
            return Err(InvalidRecord::new("note id must be usable as a key"));
        }
        Ok(())
    }
}

/// Creates a test server with an empty `notes` table.
///
/// Returns the server together with the backing table so tests can seed
/// and inspect records without going through HTTP.
pub fn create_test_server() -> (TestServer, Arc<MemoryTable<Note>>) {
    let notes = Arc::new(MemoryTable::<Note>::ephemeral("notes"));

    let mut catalog = Catalog::default();
    catalog
        .register(Arc::clone(&notes) as Arc<dyn Table>)
        .expect("Failed to register notes table");

    let app = create_api(catalog, ApiConfig::for_testing());
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, notes)
}

/// Seeds a note directly into the backing table.
pub async fn seed_note(notes: &MemoryTable<Note>, id: &str, title: &str) {
    notes
        .create(json!({ "id": id, "title": title }))
        .await
        .expect("Failed to seed note");
}
