//! In-memory table with optional JSON snapshot persistence.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::error::{DecodeError, StoreError, StoreResult};
use crate::filter::Filter;
use crate::key::RecordKey;
use crate::record::{self, ChangeSet, Record, RecordPage, StoredRecord};
use crate::table::Table;

/// A [`Table`] held in memory, optionally snapshotted to a JSON file.
///
/// Records are kept in a `BTreeMap` keyed by [`RecordKey`], so scans and
/// pages come back in key order. [`commit`](Table::commit) serializes the
/// whole map and writes it through a temporary file plus rename, keeping the
/// snapshot intact if the process dies mid-write. Tables created with
/// [`ephemeral`](MemoryTable::ephemeral) have no snapshot and treat commit
/// as a no-op.
#[derive(Debug)]
pub struct MemoryTable<R: Record> {
    name: String,
    records: RwLock<BTreeMap<RecordKey, Value>>,
    snapshot_path: Option<PathBuf>,
    defaults: Value,
    _record: PhantomData<R>,
}

impl<R: Record> MemoryTable<R> {
    /// Creates an empty table with no snapshot backing.
    pub fn ephemeral(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: RwLock::new(BTreeMap::new()),
            snapshot_path: None,
            defaults: default_value::<R>(),
            _record: PhantomData,
        }
    }

    /// Opens a table backed by a snapshot file, loading the snapshot when it
    /// exists.
    ///
    /// # Errors
    ///
    /// * `StoreError::Snapshot` - The file exists but could not be read or
    ///   parsed
    pub fn open(name: impl Into<String>, path: impl AsRef<Path>) -> StoreResult<Self> {
        let name = name.into();
        let path = path.as_ref().to_path_buf();

        let records: BTreeMap<RecordKey, Value> = if path.exists() {
            let bytes = std::fs::read(&path).map_err(|err| StoreError::Snapshot {
                table: name.clone(),
                reason: err.to_string(),
            })?;
            serde_json::from_slice(&bytes).map_err(|err| StoreError::Snapshot {
                table: name.clone(),
                reason: err.to_string(),
            })?
        } else {
            BTreeMap::new()
        };

        debug!(
            table = %name,
            records = records.len(),
            snapshot = %path.display(),
            "Opened table"
        );

        Ok(Self {
            name,
            records: RwLock::new(records),
            snapshot_path: Some(path),
            defaults: default_value::<R>(),
            _record: PhantomData,
        })
    }

    /// Loads records from a JSON array into an empty table.
    ///
    /// A table that already holds records is left untouched, so reseeding an
    /// established snapshot is harmless. Returns the number of records
    /// inserted, which is zero when seeding was skipped.
    ///
    /// # Errors
    ///
    /// * `StoreError::Decode` - An element does not fit the record type
    /// * `StoreError::Invalid` - An element failed validation
    pub fn seed_json(&self, bytes: &[u8]) -> StoreResult<usize> {
        let mut records = self.records.write();
        if !records.is_empty() {
            return Ok(0);
        }

        let seeds: Vec<R> = serde_json::from_slice(bytes).map_err(DecodeError::from)?;
        for seed in seeds {
            seed.validate()?;
            let key = seed.natural_key().unwrap_or_else(RecordKey::generate);
            let value = serde_json::to_value(&seed).map_err(DecodeError::from)?;
            records.insert(key, value);
        }

        debug!(table = %self.name, records = records.len(), "Seeded table");
        Ok(records.len())
    }
}

#[async_trait]
impl<R: Record> Table for MemoryTable<R> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find(&self, page: usize, size: usize, filter: Filter) -> StoreResult<RecordPage> {
        let records = self.records.read();
        let matched: Vec<StoredRecord> = records
            .iter()
            .filter(|(_, record)| filter.matches(record))
            .map(|(key, record)| StoredRecord {
                key: key.clone(),
                record: record.clone(),
            })
            .collect();
        let total = matched.len();
        let offset = page.saturating_sub(1).saturating_mul(size);
        let records = matched.into_iter().skip(offset).take(size).collect();

        Ok(RecordPage {
            page,
            size,
            total,
            records,
        })
    }

    async fn find_by_key(&self, key: &RecordKey) -> StoreResult<StoredRecord> {
        let records = self.records.read();
        let record = records.get(key).cloned().ok_or_else(|| self.not_found(key))?;
        Ok(StoredRecord {
            key: key.clone(),
            record,
        })
    }

    async fn create(&self, record: Value) -> StoreResult<ChangeSet> {
        let typed: R = serde_json::from_value(record).map_err(DecodeError::from)?;
        typed.validate()?;
        let key = typed.natural_key().unwrap_or_else(RecordKey::generate);
        let value = serde_json::to_value(&typed).map_err(DecodeError::from)?;

        let mut records = self.records.write();
        if records.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                table: self.name.clone(),
                key: key.to_string(),
            });
        }
        records.insert(key.clone(), value.clone());
        drop(records);

        debug!(table = %self.name, key = %key, "Record created");
        Ok(ChangeSet { key, record: value })
    }

    async fn update(&self, key: &RecordKey, record: Value) -> StoreResult<()> {
        let typed: R = serde_json::from_value(record).map_err(DecodeError::from)?;
        typed.validate()?;
        let value = serde_json::to_value(&typed).map_err(DecodeError::from)?;

        let mut records = self.records.write();
        if !records.contains_key(key) {
            return Err(self.not_found(key));
        }
        records.insert(key.clone(), value);
        drop(records);

        debug!(table = %self.name, key = %key, "Record updated");
        Ok(())
    }

    async fn delete(&self, key: &RecordKey) -> StoreResult<()> {
        let mut records = self.records.write();
        if records.remove(key).is_none() {
            return Err(self.not_found(key));
        }
        drop(records);

        debug!(table = %self.name, key = %key, "Record deleted");
        Ok(())
    }

    async fn commit(&self) -> StoreResult<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        // Serialize under the read lock, write after releasing it.
        let bytes = {
            let records = self.records.read();
            serde_json::to_vec_pretty(&*records).map_err(|err| self.commit_failed(err))?
        };

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|err| self.commit_failed(err))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|err| self.commit_failed(err))?;

        debug!(table = %self.name, bytes = bytes.len(), "Snapshot committed");
        Ok(())
    }

    fn decode_record(&self, bytes: &[u8]) -> StoreResult<Value> {
        let typed: R = serde_json::from_slice(bytes).map_err(DecodeError::from)?;
        let value = serde_json::to_value(&typed).map_err(DecodeError::from)?;
        Ok(value)
    }

    fn decode_filter(&self, bytes: &[u8]) -> StoreResult<Filter> {
        let template = self.decode_record(bytes)?;
        Ok(Filter::from_template(template, &self.defaults))
    }

    fn merge(&self, current: Value, incoming: Value) -> StoreResult<Value> {
        Ok(record::overlay(current, incoming, &self.defaults))
    }
}

impl<R: Record> MemoryTable<R> {
    fn not_found(&self, key: &RecordKey) -> StoreError {
        StoreError::NotFound {
            table: self.name.clone(),
            key: key.to_string(),
        }
    }

    fn commit_failed(&self, err: impl std::fmt::Display) -> StoreError {
        StoreError::Commit {
            table: self.name.clone(),
            reason: err.to_string(),
        }
    }
}

fn default_value<R: Record>() -> Value {
    serde_json::to_value(R::default()).unwrap_or_default()
}
