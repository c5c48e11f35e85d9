//! Storage module for accumulated scrape results
//!
//! This module holds the in-memory result store and the checkpoint writer
//! that snapshots it to a JSON file:
//! - `ResultStore`: dataset id -> record id -> reaction record
//! - `CheckpointSink`: anything that can persist a snapshot of the store
//! - `JsonCheckpointWriter`: full-overwrite JSON file writer

mod json;
mod traits;

pub use json::{load_store, JsonCheckpointWriter};
pub use traits::{CheckpointSink, StorageError, StorageResult};

use crate::reaction::ReactionRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Records of one dataset, keyed by record id
pub type DatasetRecords = BTreeMap<String, ReactionRecord>;

/// Mapping from dataset id to the records scraped for it
///
/// Grows monotonically over a run. Serializes as a two-level JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultStore {
    datasets: BTreeMap<String, DatasetRecords>,
}

impl ResultStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dataset so it appears in snapshots even with no records
    pub fn ensure_dataset(&mut self, dataset_id: &str) {
        self.datasets.entry(dataset_id.to_string()).or_default();
    }

    /// Inserts a record, returning the one it replaced, if any
    pub fn insert(
        &mut self,
        dataset_id: &str,
        record_id: &str,
        record: ReactionRecord,
    ) -> Option<ReactionRecord> {
        self.datasets
            .entry(dataset_id.to_string())
            .or_default()
            .insert(record_id.to_string(), record)
    }

    /// Gets a single record
    pub fn get(&self, dataset_id: &str, record_id: &str) -> Option<&ReactionRecord> {
        self.datasets.get(dataset_id)?.get(record_id)
    }

    /// Gets all records of a dataset
    pub fn dataset(&self, dataset_id: &str) -> Option<&DatasetRecords> {
        self.datasets.get(dataset_id)
    }

    /// Iterates over datasets in key order
    pub fn datasets(&self) -> impl Iterator<Item = (&String, &DatasetRecords)> {
        self.datasets.iter()
    }

    /// Number of datasets in the store
    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    /// Total number of records across all datasets
    pub fn record_count(&self) -> usize {
        self.datasets.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(input: &str) -> ReactionRecord {
        ReactionRecord {
            raw_inputs: vec![input.to_string()],
            outcomes: vec!["O".to_string()],
        }
    }

    #[test]
    fn test_insert_and_count() {
        let mut store = ResultStore::new();
        assert!(store.is_empty());

        store.insert("10.1/a", "/id/1", record("C"));
        store.insert("10.1/a", "/id/2", record("N"));
        store.insert("10.1/b", "/id/3", record("S"));

        assert_eq!(store.dataset_count(), 2);
        assert_eq!(store.record_count(), 3);
        assert_eq!(store.get("10.1/a", "/id/2"), Some(&record("N")));
        assert!(store.get("10.1/b", "/id/1").is_none());
    }

    #[test]
    fn test_duplicate_record_overwrites() {
        let mut store = ResultStore::new();
        assert!(store.insert("d", "/id/1", record("C")).is_none());
        let previous = store.insert("d", "/id/1", record("N"));

        assert_eq!(previous, Some(record("C")));
        assert_eq!(store.record_count(), 1);
        assert_eq!(store.get("d", "/id/1"), Some(&record("N")));
    }

    #[test]
    fn test_ensure_dataset_keeps_records() {
        let mut store = ResultStore::new();
        store.ensure_dataset("d");
        assert_eq!(store.dataset_count(), 1);
        assert_eq!(store.record_count(), 0);

        store.insert("d", "/id/1", record("C"));
        store.ensure_dataset("d");
        assert_eq!(store.record_count(), 1);
    }

    #[test]
    fn test_serializes_as_nested_objects() {
        let mut store = ResultStore::new();
        store.insert("10.1021/x", "/id/1", record("C"));

        let value = serde_json::to_value(&store).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "10.1021/x": {
                    "/id/1": { "raw_inputs": ["C"], "outcomes": ["O"] }
                }
            })
        );
    }

    #[test]
    fn test_empty_store_serializes_as_empty_object() {
        let json = serde_json::to_string(&ResultStore::new()).unwrap();
        assert_eq!(json, "{}");
    }
}
