//! Key-addressed record tables with JSON snapshot persistence.
//!
//! This crate provides the storage layer behind the shelf REST surface:
//! named tables of records, each table bound to one concrete record type
//! but served through the object-safe [`Table`] trait so a registry can
//! hold tables of different types side by side.
//!
//! # Design
//!
//! - **Typed edges, JSON middle**: payloads cross [`Table`] as
//!   [`serde_json::Value`], and every implementation decodes and validates
//!   them against its own record type. Callers never need the concrete type.
//! - **Defaults mean absent**: a record type's `Default` instance defines
//!   which field values count as "unset". Partial updates and search
//!   templates both lean on this, via [`record::overlay`] and
//!   [`Filter::from_template`].
//! - **Explicit durability**: mutations land in memory; [`Table::commit`]
//!   writes the snapshot. The REST layer commits after every successful
//!   mutation.
//!
//! # Quick Start
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use shelf_store::{InvalidRecord, MemoryTable, Record, RecordKey, Table};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! #[serde(default)]
//! struct Note {
//!     id: String,
//!     title: String,
//! }
//!
//! impl Record for Note {
//!     fn natural_key(&self) -> Option<RecordKey> {
//!         self.id.parse().ok()
//!     }
//!
//!     fn validate(&self) -> Result<(), InvalidRecord> {
//!         if self.title.is_empty() {
//!             return Err(InvalidRecord::new("title is required"));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let table = MemoryTable::<Note>::ephemeral("notes");
//! let change = table
//!     .create(serde_json::json!({"id": "intro", "title": "Hello"}))
//!     .await
//!     .unwrap();
//! assert_eq!(change.key.as_str(), "intro");
//! # });
//! ```
//!
//! # Architecture
//!
//! - [`key`] - Record key parsing and generation
//! - [`record`] - The [`Record`] contract plus the payload carrier types
//! - [`filter`] - Template-based record filtering
//! - [`table`] - The object-safe [`Table`] trait
//! - [`memory`] - The in-memory, snapshot-backed implementation
//! - [`error`] - Error types for all operations

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod filter;
pub mod key;
pub mod memory;
pub mod record;
pub mod table;

// Re-export the working set at the crate root
pub use error::{DecodeError, InvalidRecord, KeyError, StoreError, StoreResult};
pub use filter::Filter;
pub use key::RecordKey;
pub use memory::MemoryTable;
pub use record::{ChangeSet, Record, RecordPage, StoredRecord};
pub use table::Table;
