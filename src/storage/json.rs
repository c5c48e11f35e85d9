//! JSON file checkpoints
//!
//! The file holds one JSON object: dataset ids map to objects keyed by record
//! id, whose values carry `raw_inputs` and `outcomes` arrays.

use crate::storage::traits::{CheckpointSink, StorageError, StorageResult};
use crate::storage::ResultStore;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes full snapshots of the result store to a JSON file
#[derive(Debug, Clone)]
pub struct JsonCheckpointWriter {
    path: PathBuf,
}

impl JsonCheckpointWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes `store` and replaces the file contents with it
    ///
    /// The snapshot is written to a sibling temporary file first and then
    /// renamed over the target, so readers never observe a half-written file.
    pub fn write(&self, store: &ResultStore) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(store)?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json.as_bytes()).map_err(|source| StorageError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            "Wrote checkpoint to {} ({} datasets, {} records)",
            self.path.display(),
            store.dataset_count(),
            store.record_count()
        );
        Ok(())
    }

    /// Initializes the file with an empty object
    pub fn reset(&self) -> StorageResult<()> {
        self.write(&ResultStore::new())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CheckpointSink for JsonCheckpointWriter {
    fn save(&mut self, store: &ResultStore) -> StorageResult<()> {
        self.write(store)
    }
}

/// Reads a previously written output file
///
/// Used for reporting only; scraping runs never start from a loaded store.
pub fn load_store(path: &Path) -> StorageResult<ResultStore> {
    let content = fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reaction::ReactionRecord;
    use tempfile::TempDir;

    fn record(input: &str) -> ReactionRecord {
        ReactionRecord {
            raw_inputs: vec![input.to_string()],
            outcomes: vec![],
        }
    }

    #[test]
    fn test_write_and_load() {
        let dir = TempDir::new().unwrap();
        let writer = JsonCheckpointWriter::new(dir.path().join("scraped_data.json"));

        let mut store = ResultStore::new();
        store.insert("10.1/a", "/id/1", record("CCO"));
        writer.write(&store).unwrap();

        let loaded = load_store(writer.path()).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_write_overwrites_in_full() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scraped_data.json");
        let writer = JsonCheckpointWriter::new(&path);

        let mut first = ResultStore::new();
        first.insert("old", "/id/1", record("C"));
        writer.write(&first).unwrap();

        let mut second = ResultStore::new();
        second.insert("new", "/id/2", record("N"));
        writer.write(&second).unwrap();

        let loaded = load_store(&path).unwrap();
        assert!(loaded.dataset("old").is_none());
        assert_eq!(loaded.record_count(), 1);
        assert!(!dir.path().join("scraped_data.json.tmp").exists());
    }

    #[test]
    fn test_reset_writes_empty_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let writer = JsonCheckpointWriter::new(&path);

        writer.reset().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "{}");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let mut writer = JsonCheckpointWriter::new(dir.path().join("missing/out.json"));

        let result = writer.save(&ResultStore::new());
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load_store(Path::new("/nonexistent/scraped_data.json"));
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }
}
