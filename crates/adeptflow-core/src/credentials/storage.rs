//! Key/value storage backends for the credential store
//!
//! The store writes whole batches at once so that a failed write (quota,
//! IO error) leaves the previously persisted values untouched.

use crate::error::{CoreError, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Persistent string key/value storage
pub trait KeyValueStorage: Send + Sync {
    /// Read a single value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write all entries atomically: either every entry lands or none does
    fn set_many(&self, entries: &[(String, String)]) -> Result<()>;

    /// Remove the given keys (missing keys are ignored)
    fn remove_many(&self, keys: &[String]) -> Result<()>;

    /// List every stored key
    fn keys(&self) -> Result<Vec<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key.to_string(), value.to_string())])
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.remove_many(&[key.to_string()])
    }
}

/// JSON file backed storage
///
/// The whole map lives in one file. Every write goes through a temporary file
/// in the same directory and replaces the original by rename. No copy of
/// earlier contents is kept, so removed keys are gone from disk.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| CoreError::CorruptStorage {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let content = serde_json::to_string_pretty(map)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        restrict_permissions(tmp.path())?;

        tmp.persist(&self.path)
            .map_err(|e| CoreError::Storage(format!("{}: {}", self.path.display(), e.error)))?;

        debug!(path = %self.path.display(), entries = map.len(), "Saved storage file");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set_many(&self, entries: &[(String, String)]) -> Result<()> {
        let mut map = self.read_map()?;
        for (key, value) in entries {
            map.insert(key.clone(), value.clone());
        }
        self.write_map(&map)
    }

    fn remove_many(&self, keys: &[String]) -> Result<()> {
        let mut map = self.read_map()?;
        let before = map.len();
        for key in keys {
            map.remove(key);
        }
        if map.len() == before {
            return Ok(());
        }
        self.write_map(&map)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.read_map()?.into_keys().collect())
    }
}

/// In-memory storage with an optional byte quota
///
/// The quota counts key and value bytes across all entries, mirroring the
/// per-origin limit of browser storage.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            quota: Some(quota),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| CoreError::Storage("memory storage lock poisoned".to_string()))
    }

    /// Raw stored value, bypassing deobfuscation
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().ok().and_then(|m| m.get(key).cloned())
    }
}

fn used_bytes(map: &BTreeMap<String, String>) -> usize {
    map.iter().map(|(k, v)| k.len() + v.len()).sum()
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_many(&self, entries: &[(String, String)]) -> Result<()> {
        let mut map = self.lock()?;

        let mut next = map.clone();
        for (key, value) in entries {
            next.insert(key.clone(), value.clone());
        }

        if let Some(limit) = self.quota {
            let needed = used_bytes(&next);
            if needed > limit {
                return Err(CoreError::QuotaExceeded { needed, limit });
            }
        }

        *map = next;
        Ok(())
    }

    fn remove_many(&self, keys: &[String]) -> Result<()> {
        let mut map = self.lock()?;
        for key in keys {
            map.remove(key);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_set_get() {
        let temp_dir = tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("credentials.json"));

        storage.set("a", "1").unwrap();
        storage
            .set_many(&[("b".into(), "2".into()), ("c".into(), "3".into())])
            .unwrap();

        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(storage.get("c").unwrap().as_deref(), Some("3"));
        assert_eq!(storage.get("missing").unwrap(), None);
        assert_eq!(storage.keys().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let temp_dir = tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("nested/dir/store.json"));
        assert!(storage.keys().unwrap().is_empty());

        storage.set("k", "v").unwrap();
        assert!(storage.path().exists());
    }

    #[test]
    fn test_file_storage_leaves_no_stale_copies() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("credentials.json");
        let storage = FileStorage::new(&path);

        storage.set("k", "first").unwrap();
        storage.set("k", "second").unwrap();
        storage.remove("k").unwrap();

        let files: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files, vec![path.clone()]);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("first"));
        assert!(!content.contains("second"));
    }

    #[test]
    fn test_file_storage_remove() {
        let temp_dir = tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("credentials.json"));

        storage
            .set_many(&[("x".into(), "1".into()), ("y".into(), "2".into())])
            .unwrap();
        storage.remove("x").unwrap();
        storage.remove("never-existed").unwrap();

        assert_eq!(storage.keys().unwrap(), vec!["y"]);
    }

    #[test]
    fn test_file_storage_corrupt() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("credentials.json");
        std::fs::write(&path, "{ not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get("k"),
            Err(CoreError::CorruptStorage { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_storage_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("credentials.json");
        FileStorage::new(&path).set("k", "v").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_quota_is_atomic() {
        let storage = MemoryStorage::with_quota(10);
        storage.set("a", "1234").unwrap();

        let result = storage.set_many(&[("b".into(), "1".into()), ("c".into(), "123456".into())]);
        assert!(matches!(result, Err(CoreError::QuotaExceeded { .. })));

        // nothing from the rejected batch lands
        assert_eq!(storage.keys().unwrap(), vec!["a"]);
    }
}
