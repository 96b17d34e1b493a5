use crate::{StorageBackend, StorageConfig, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error, info, warn};

/// On-disk layout of the store
#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    namespace: String,
    version: String,
    #[serde(default)]
    entries: Map<String, Value>,
}

/// Everything in the store, as handed out by [`StorageManager::export_data`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    pub app: String,
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub data: Map<String, Value>,
}

impl ExportSnapshot {
    /// Write the snapshot as pretty JSON, creating parent directories
    pub fn write_to(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!("Wrote export of {} keys to {:?}", self.data.len(), path);
        Ok(())
    }
}

/// Summary of the store contents
#[derive(Debug, Clone, PartialEq)]
pub struct StorageInfo {
    pub backend: String,
    pub namespace: String,
    pub version: String,
    pub keys: usize,
    pub size_bytes: usize,
}

/// Namespaced, versioned key-value store.
///
/// Values are kept as JSON in memory and written through to the backend on
/// every mutation, so a crash never loses an acknowledged `save`.
#[derive(Debug)]
pub struct StorageManager {
    namespace: String,
    version: String,
    backend: StorageBackend,
    entries: RwLock<Map<String, Value>>,
}

impl StorageManager {
    /// Open the store described by `config`, creating its directory if needed
    pub fn open(config: StorageConfig) -> StorageResult<Self> {
        let entries = match &config.backend {
            StorageBackend::File { path } => read_document(path, &config)?,
            StorageBackend::Memory => Map::new(),
        };

        info!(
            "Storage manager opened ({}, {} entries)",
            describe_backend(&config.backend),
            entries.len()
        );

        Ok(Self {
            namespace: config.namespace,
            version: config.version,
            backend: config.backend,
            entries: RwLock::new(entries),
        })
    }

    /// Memory-only store with the default namespace and version
    pub fn in_memory() -> Self {
        let config = StorageConfig::memory();
        Self {
            namespace: config.namespace,
            version: config.version,
            backend: config.backend,
            entries: RwLock::new(Map::new()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Decode the value under `key`, falling back to `default` when the key is
    /// missing or holds something that does not decode as `T`
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let entries = self.read_entries();
        let Some(value) = entries.get(key) else {
            debug!("Storage key '{}' not found, using default", key);
            return default;
        };

        match serde_json::from_value(value.clone()) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Failed to decode storage key '{}': {}", key, e);
                default
            }
        }
    }

    /// Store `value` under `key` and write the document through
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.write_entries();
        let previous = entries.insert(key.to_string(), value);

        if let Err(e) = self.persist(&entries) {
            // Keep memory consistent with what is on disk
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            error!("Failed to save storage key '{}': {}", key, e);
            return Err(e);
        }

        debug!("Saved storage key '{}'", key);
        Ok(())
    }

    /// Delete `key`; removing a missing key is a no-op
    pub fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.write_entries();
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.persist(&entries) {
            entries.insert(key.to_string(), previous);
            error!("Failed to remove storage key '{}': {}", key, e);
            return Err(e);
        }

        debug!("Removed storage key '{}'", key);
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.read_entries().contains_key(key)
    }

    /// Copy of every entry, or `None` when the store is empty
    pub fn export_data(&self) -> Option<ExportSnapshot> {
        let entries = self.read_entries();
        if entries.is_empty() {
            warn!("Export requested on an empty store");
            return None;
        }

        Some(ExportSnapshot {
            app: self.namespace.clone(),
            version: self.version.clone(),
            exported_at: Utc::now(),
            data: entries.clone(),
        })
    }

    /// Replace all entries with the snapshot contents
    pub fn import_data(&self, snapshot: ExportSnapshot) -> StorageResult<usize> {
        if snapshot.app != self.namespace {
            return Err(StorageError::NamespaceMismatch {
                expected: self.namespace.clone(),
                found: snapshot.app,
            });
        }
        if snapshot.version != self.version {
            warn!(
                "Importing snapshot version {} into store version {}",
                snapshot.version, self.version
            );
        }

        let mut entries = self.write_entries();
        let previous = std::mem::replace(&mut *entries, snapshot.data);
        if let Err(e) = self.persist(&entries) {
            *entries = previous;
            return Err(e);
        }

        info!("Imported {} storage keys", entries.len());
        Ok(entries.len())
    }

    /// Remove every entry
    pub fn clear(&self) -> StorageResult<()> {
        let mut entries = self.write_entries();
        let previous = std::mem::take(&mut *entries);
        if let Err(e) = self.persist(&entries) {
            *entries = previous;
            return Err(e);
        }
        info!("Storage cleared");
        Ok(())
    }

    pub fn storage_info(&self) -> StorageInfo {
        let entries = self.read_entries();
        let size_bytes = serde_json::to_vec(&*entries).map(|b| b.len()).unwrap_or(0);
        StorageInfo {
            backend: describe_backend(&self.backend),
            namespace: self.namespace.clone(),
            version: self.version.clone(),
            keys: entries.len(),
            size_bytes,
        }
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, Map<String, Value>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, Map<String, Value>> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, entries: &Map<String, Value>) -> StorageResult<()> {
        let StorageBackend::File { path } = &self.backend else {
            return Ok(());
        };

        let document = StoreDocument {
            namespace: self.namespace.clone(),
            version: self.version.clone(),
            entries: entries.clone(),
        };
        write_document(path, &document)
    }
}

fn describe_backend(backend: &StorageBackend) -> String {
    match backend {
        StorageBackend::File { path } => format!("file:{}", path.display()),
        StorageBackend::Memory => "memory".to_string(),
    }
}

/// Read the store document, starting empty when it is missing or unreadable
fn read_document(path: &Path, config: &StorageConfig) -> StorageResult<Map<String, Value>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating data directory: {:?}", parent);
            fs::create_dir_all(parent)?;
        }
    }

    if !path.exists() {
        debug!("Store file {:?} does not exist yet", path);
        return Ok(Map::new());
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to read store file {:?}: {}", path, e);
            warn!("Starting with an empty store");
            return Ok(Map::new());
        }
    };

    match serde_json::from_str::<StoreDocument>(&content) {
        Ok(document) => {
            if document.namespace != config.namespace {
                warn!(
                    "Store file namespace '{}' differs from '{}'",
                    document.namespace, config.namespace
                );
            }
            if document.version != config.version {
                warn!(
                    "Store file version {} differs from {}, loading as-is",
                    document.version, config.version
                );
            }
            Ok(document.entries)
        }
        Err(e) => {
            error!("Failed to parse store file {:?}: {}", path, e);
            warn!("Starting with an empty store");
            Ok(Map::new())
        }
    }
}

/// Write via a sibling temp file so a torn write never replaces good data
fn write_document(path: &Path, document: &StoreDocument) -> StorageResult<()> {
    let json_content = serde_json::to_string_pretty(document)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json_content)?;
    fs::rename(&tmp_path, path)?;
    debug!(
        "Wrote {} storage keys to {:?}",
        document.entries.len(),
        path
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn file_store(dir: &TempDir) -> StorageManager {
        StorageManager::open(StorageConfig::in_dir(dir.path())).unwrap()
    }

    #[test]
    fn test_load_missing_key_returns_default() {
        let storage = StorageManager::in_memory();
        let users: Vec<String> = storage.load("users", Vec::new());
        assert!(users.is_empty());
        assert_eq!(storage.load("currentUser", Option::<String>::None), None);
    }

    #[test]
    fn test_save_load_remove() {
        let storage = StorageManager::in_memory();
        storage.save("answer", &42u32).unwrap();
        assert!(storage.contains("answer"));
        assert_eq!(storage.load("answer", 0u32), 42);

        storage.remove("answer").unwrap();
        assert!(!storage.contains("answer"));
        assert_eq!(storage.load("answer", 7u32), 7);

        // Removing twice is fine
        storage.remove("answer").unwrap();
    }

    #[test]
    fn test_load_wrong_shape_falls_back() {
        let storage = StorageManager::in_memory();
        storage.save("users", &json!({"not": "a list"})).unwrap();
        let users: Vec<u32> = storage.load("users", vec![1]);
        assert_eq!(users, vec![1]);
    }

    #[test]
    fn test_entries_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let storage = file_store(&dir);
            storage.save("currentUser", &json!({"id": "u1", "username": "budi"})).unwrap();
            storage.save("tasks", &Vec::<u32>::new()).unwrap();
        }

        let reopened = file_store(&dir);
        let user: Value = reopened.load("currentUser", Value::Null);
        assert_eq!(user, json!({"id": "u1", "username": "budi"}));
        assert_eq!(reopened.storage_info().keys, 2);
    }

    #[test]
    fn test_document_layout_on_disk() {
        let dir = TempDir::new().unwrap();
        let storage = file_store(&dir);
        storage.save("users", &json!([])).unwrap();

        let raw = fs::read_to_string(taskboard_core::store_file(dir.path())).unwrap();
        let doc: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["namespace"], json!("taskAppDay2"));
        assert_eq!(doc["version"], json!("2.0"));
        assert_eq!(doc["entries"]["users"], json!([]));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(taskboard_core::store_file(dir.path()), "{ not json").unwrap();

        let storage = file_store(&dir);
        assert_eq!(storage.storage_info().keys, 0);

        // And the store is usable afterwards
        storage.save("users", &json!([])).unwrap();
        assert_eq!(file_store(&dir).storage_info().keys, 1);
    }

    #[test]
    fn test_export_empty_store_is_none() {
        let storage = StorageManager::in_memory();
        assert!(storage.export_data().is_none());
    }

    #[test]
    fn test_export_then_import() {
        let source = StorageManager::in_memory();
        source.save("users", &json!([{"id": "u1"}])).unwrap();
        let snapshot = source.export_data().unwrap();
        assert_eq!(snapshot.app, "taskAppDay2");
        assert_eq!(snapshot.data.len(), 1);

        let target = StorageManager::in_memory();
        target.save("stale", &true).unwrap();
        assert_eq!(target.import_data(snapshot).unwrap(), 1);
        assert!(!target.contains("stale"));
        assert!(target.contains("users"));
    }

    #[test]
    fn test_write_to_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let storage = StorageManager::in_memory();
        storage.save("users", &json!([])).unwrap();

        let path = dir.path().join("nested/backup.json");
        storage.export_data().unwrap().write_to(&path).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["app"], "taskAppDay2");
        assert!(written["exportedAt"].is_string());
    }

    #[test]
    fn test_import_rejects_foreign_namespace() {
        let storage = StorageManager::in_memory();
        let snapshot = ExportSnapshot {
            app: "someOtherApp".to_string(),
            version: "1.0".to_string(),
            exported_at: Utc::now(),
            data: Map::new(),
        };
        assert!(matches!(
            storage.import_data(snapshot),
            Err(StorageError::NamespaceMismatch { .. })
        ));
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let storage = file_store(&dir);
        storage.save("a", &1).unwrap();
        storage.save("b", &2).unwrap();
        storage.clear().unwrap();
        assert_eq!(file_store(&dir).storage_info().keys, 0);
    }
}
