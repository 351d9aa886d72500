use super::error::PersistenceError;
use super::files::atomic_write;
#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// String-keyed storage medium, the local equivalent of a browser's localStorage
pub trait KeyValueStore {
    /// Value under `key`, `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// In-memory store that also records which keys were written, in order
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: Vec<String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without logging it as a write
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes.push(key.to_string());
        Ok(())
    }
}

/// One file per key inside a data directory, replaced atomically on every write
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        atomic_write(self.path_for(key), value).map_err(|source| PersistenceError::Io {
            key: key.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_logs_writes() {
        let mut store = MemoryStore::new().with_value("seed", "1");
        assert_eq!(store.get("seed").unwrap(), Some("1".to_string()));
        assert!(store.writes().is_empty());

        store.set("a", "x").unwrap();
        store.set("b", "y").unwrap();
        store.set("a", "z").unwrap();

        assert_eq!(store.get("a").unwrap(), Some("z".to_string()));
        assert_eq!(store.writes(), ["a", "b", "a"]);

        store.clear_writes();
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_file_store_missing_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path());
        assert_eq!(store.get("todos").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_and_get() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        store.set("nextId", "7").unwrap();
        assert_eq!(store.get("nextId").unwrap(), Some("7".to_string()));
        assert!(temp_dir.path().join("nextId").is_file());
    }

    #[test]
    fn test_file_store_missing_dir_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("gone"));

        let err = store.set("todos", "[]").unwrap_err();
        assert!(matches!(err, PersistenceError::Io { ref key, .. } if key == "todos"));
    }
}
