//! Checkpoint traits and error types
//!
//! This module defines the trait interface for checkpoint destinations and
//! the associated error type.

use crate::storage::ResultStore;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing or reading checkpoints
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Destination for periodic snapshots of the result store
///
/// A snapshot replaces whatever the previous one wrote; nothing is merged.
pub trait CheckpointSink {
    /// Persists a full snapshot of `store`
    fn save(&mut self, store: &ResultStore) -> StorageResult<()>;
}
