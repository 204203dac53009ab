//! The record contract implemented by stored data types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::InvalidRecord;
use crate::key::RecordKey;

/// A data type that can live in a table.
///
/// Implementors are plain serde-friendly structs. The `Default` instance
/// doubles as the type's notion of "unset": a field whose value matches the
/// default serialization is treated as absent by partial updates and search
/// templates, so required fields should default to something no real record
/// carries (an empty string, zero, `None`).
pub trait Record: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    /// Returns the key embedded in the record, if the type carries one.
    ///
    /// Types without a key field return `None` and get a generated key on
    /// create.
    fn natural_key(&self) -> Option<RecordKey> {
        None
    }

    /// Checks domain constraints beyond what deserialization enforces.
    fn validate(&self) -> Result<(), InvalidRecord> {
        Ok(())
    }
}

/// A record paired with the key it is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Key the record is stored under.
    pub key: RecordKey,
    /// The record payload.
    pub record: Value,
}

/// The outcome of a successful create: the assigned key and the payload as
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Key the new record was stored under.
    pub key: RecordKey,
    /// The record payload as stored.
    pub record: Value,
}

/// One page of records from a table scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPage {
    /// 1-based page number that was served.
    pub page: usize,
    /// Requested page size.
    pub size: usize,
    /// Total number of matching records across all pages.
    pub total: usize,
    /// Records on this page, in key order.
    pub records: Vec<StoredRecord>,
}

impl RecordPage {
    /// Creates a page with no records.
    pub fn empty(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            total: 0,
            records: Vec::new(),
        }
    }

    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether this page carries no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Overlays the populated fields of `incoming` onto `current`.
///
/// A field counts as populated when it is non-null and differs from the
/// value in `defaults`, the serialized `Default` instance of the record
/// type. Fields `defaults` does not mention are always kept. Non-object
/// payloads replace `current` wholesale.
pub fn overlay(current: Value, incoming: Value, defaults: &Value) -> Value {
    match (current, incoming) {
        (Value::Object(mut base), Value::Object(fields)) => {
            let default_fields = defaults.as_object();
            for (field, value) in fields {
                if value.is_null() {
                    continue;
                }
                let is_default = default_fields
                    .and_then(|d| d.get(&field))
                    .is_some_and(|d| *d == value);
                if !is_default {
                    base.insert(field, value);
                }
            }
            Value::Object(base)
        }
        (_, incoming) => incoming,
    }
}
