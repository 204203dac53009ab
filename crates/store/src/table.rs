//! The table abstraction served over the REST surface.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;
use crate::filter::Filter;
use crate::key::RecordKey;
use crate::record::{ChangeSet, RecordPage, StoredRecord};

/// A named collection of records addressable by key.
///
/// The trait is object-safe so heterogeneous tables can hang off a single
/// registry as `Arc<dyn Table>`. Record payloads cross the boundary as
/// [`serde_json::Value`]; each implementation decodes, validates, and merges
/// them against its own concrete record type via [`decode_record`],
/// [`decode_filter`], and [`merge`].
///
/// `find` expects `page` and `size` to be 1-based and at least 1, which the
/// page token decoder guarantees.
///
/// Mutations take effect in memory immediately; [`commit`] persists the
/// table's current contents. Callers that need durability invoke it after
/// each successful mutation.
///
/// [`decode_record`]: Table::decode_record
/// [`decode_filter`]: Table::decode_filter
/// [`merge`]: Table::merge
/// [`commit`]: Table::commit
#[async_trait]
pub trait Table: Send + Sync {
    /// Name the table is registered and addressed under.
    fn name(&self) -> &str;

    /// Returns one page of records matching `filter`, in key order.
    ///
    /// # Arguments
    ///
    /// * `page` - 1-based page number
    /// * `size` - Records per page
    /// * `filter` - Which records to include
    async fn find(&self, page: usize, size: usize, filter: Filter) -> StoreResult<RecordPage>;

    /// Returns the record stored under `key`.
    ///
    /// # Errors
    ///
    /// * `StoreError::NotFound` - No record exists under `key`
    async fn find_by_key(&self, key: &RecordKey) -> StoreResult<StoredRecord>;

    /// Validates and stores a new record, deriving its key from the record's
    /// natural key or generating one.
    ///
    /// # Errors
    ///
    /// * `StoreError::Invalid` - The record failed validation
    /// * `StoreError::AlreadyExists` - The derived key is taken
    /// * `StoreError::Decode` - The payload does not fit the record type
    async fn create(&self, record: Value) -> StoreResult<ChangeSet>;

    /// Validates `record` and replaces the record stored under `key`.
    ///
    /// # Errors
    ///
    /// * `StoreError::NotFound` - No record exists under `key`
    /// * `StoreError::Invalid` - The record failed validation
    /// * `StoreError::Decode` - The payload does not fit the record type
    async fn update(&self, key: &RecordKey, record: Value) -> StoreResult<()>;

    /// Removes the record stored under `key`.
    ///
    /// # Errors
    ///
    /// * `StoreError::NotFound` - No record exists under `key`
    async fn delete(&self, key: &RecordKey) -> StoreResult<()>;

    /// Persists the table's current contents.
    ///
    /// Tables without a persistence target treat this as a no-op.
    ///
    /// # Errors
    ///
    /// * `StoreError::Commit` - The contents could not be written
    async fn commit(&self) -> StoreResult<()>;

    /// Decodes a raw JSON payload into this table's record shape.
    ///
    /// The returned value is the record as the table would store it, with
    /// unknown fields dropped and missing fields filled from the type's
    /// defaults.
    ///
    /// # Errors
    ///
    /// * `StoreError::Decode` - The payload does not fit the record type
    fn decode_record(&self, bytes: &[u8]) -> StoreResult<Value>;

    /// Decodes a raw JSON payload into a search filter for this table.
    ///
    /// # Errors
    ///
    /// * `StoreError::Decode` - The payload does not fit the record type
    fn decode_filter(&self, bytes: &[u8]) -> StoreResult<Filter>;

    /// Overlays the populated fields of `incoming` onto `current`.
    ///
    /// Both values are expected in the shape [`decode_record`] produces.
    ///
    /// [`decode_record`]: Table::decode_record
    fn merge(&self, current: Value, incoming: Value) -> StoreResult<Value>;
}
