use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use super::KeyValueStore;
use crate::{Error, Result};

/// Store persisted as a single JSON object (`{"key": "value", ...}`) on disk.
///
/// Every call re-reads the file, so separate processes see each other's
/// writes; there is no cross-process locking. Writes go to a sibling temp
/// file that is renamed over the store, and a store that no longer parses is
/// replaced on the next write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|error| {
            Error::Storage(format!(
                "Failed to parse store at {}: {error}",
                self.path.display()
            ))
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let serialized = serde_json::to_string_pretty(entries)?;
        let temp_path = self.temp_path();
        std::fs::write(&temp_path, serialized)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn modify(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| Error::Storage("file store lock poisoned".to_string()))?;
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(Error::Storage(message)) => {
                warn!(%message, "Replacing unreadable store");
                BTreeMap::new()
            }
            Err(error) => return Err(error),
        };
        apply(&mut entries);
        self.save(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("cache.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("cache.json");

        FileStore::new(&path)
            .set("ignux_content_portfolio", r#"[{"id":"1"}]"#)
            .unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("ignux_content_portfolio").unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );
    }

    #[test]
    fn remove_deletes_only_that_key() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("cache.json"));
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "{not json").unwrap();
        let error = FileStore::new(&path).get("a").unwrap_err();
        assert!(matches!(error, Error::Storage(_)));
    }

    #[test]
    fn corrupt_file_is_replaced_on_next_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "{\"ignux_content_blog\": \"[").unwrap();
        let store = FileStore::new(&path);

        store.set("ignux_content_blog", "[]").unwrap();

        assert_eq!(store.get("ignux_content_blog").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn writes_leave_no_temp_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let store = FileStore::new(&path);

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        let names = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect::<Vec<_>>();
        assert_eq!(names, vec![std::ffi::OsString::from("cache.json")]);
    }
}
