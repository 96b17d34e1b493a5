// ABOUTME: Key-value persistence for Taskboard backed by a single JSON document
// ABOUTME: Provides load/save/remove/export over namespaced, versioned entries

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub mod manager;

pub use manager::{ExportSnapshot, StorageInfo, StorageManager};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Snapshot belongs to '{found}', expected '{expected}'")]
    NamespaceMismatch { expected: String, found: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Where the store document lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StorageBackend {
    /// Pretty-printed JSON document on disk
    File { path: PathBuf },
    /// Process memory only (tests, dry runs)
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub namespace: String,
    pub version: String,
    pub backend: StorageBackend,
}

impl StorageConfig {
    /// File-backed store inside `data_dir`
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::File {
                path: taskboard_core::store_file(&data_dir.into()),
            },
            ..Self::default()
        }
    }

    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            ..Self::default()
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: taskboard_core::STORE_NAMESPACE.to_string(),
            version: taskboard_core::STORE_VERSION.to_string(),
            backend: StorageBackend::File {
                path: taskboard_core::store_file(&taskboard_core::default_data_dir()),
            },
        }
    }
}
