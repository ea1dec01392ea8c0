//! Key-value stores readable by both the app and the widget.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};

pub trait SharedStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn write(&self, key: &str, value: &[u8]) -> Result<()>;
}

/// One `<key>.json` file per entry inside a shared directory.
#[derive(Debug, Clone)]
pub struct FileSharedStore {
    dir: PathBuf,
}

impl FileSharedStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(Error::InvalidInput(format!("invalid shared store key: {key}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SharedStore for FileSharedStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match std::fs::read(self.entry_path(key)?) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    // Each writer stages its own file, so the last rename wins whole.
    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.entry_path(key)?;
        std::fs::create_dir_all(&self.dir)?;
        let partial = self
            .dir
            .join(format!(".{key}-{}.json.tmp", uuid::Uuid::new_v4()));
        let published =
            std::fs::write(&partial, value).and_then(|()| std::fs::rename(&partial, &path));
        if let Err(error) = published {
            let _ = std::fs::remove_file(&partial);
            return Err(error.into());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySharedStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySharedStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SharedStore for MemorySharedStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let guard = self
            .entries
            .lock()
            .map_err(|error| Error::Io(std::io::Error::other(error.to_string())))?;
        Ok(guard.get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|error| Error::Io(std::io::Error::other(error.to_string())))?;
        guard.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_store_roundtrip_creates_directory() {
        let tmp = tempdir().unwrap();
        let store = FileSharedStore::new(tmp.path().join("group").join("shared"));

        assert_eq!(store.read("recent_notes_cache").unwrap(), None);
        store.write("recent_notes_cache", b"[1]").unwrap();
        assert_eq!(
            store.read("recent_notes_cache").unwrap().as_deref(),
            Some(&b"[1]"[..])
        );
        assert!(store.dir().join("recent_notes_cache.json").exists());
        let entries = std::fs::read_dir(store.dir()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn file_store_overwrites_wholesale() {
        let tmp = tempdir().unwrap();
        let store = FileSharedStore::new(tmp.path());
        store.write("k", b"first-long-value").unwrap();
        store.write("k", b"2").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some(&b"2"[..]));
    }

    #[test]
    fn concurrent_writers_publish_whole_entries() {
        let tmp = tempdir().unwrap();
        let store = std::sync::Arc::new(FileSharedStore::new(tmp.path()));
        let payloads: Vec<Vec<u8>> = (b'a'..=b'd').map(|byte| vec![byte; 4096]).collect();

        for _ in 0..50 {
            let handles: Vec<_> = payloads
                .iter()
                .cloned()
                .map(|payload| {
                    let store = store.clone();
                    std::thread::spawn(move || store.write("recent_notes_cache", &payload))
                })
                .collect();
            for handle in handles {
                handle.join().unwrap().unwrap();
            }

            let stored = store.read("recent_notes_cache").unwrap().unwrap();
            assert!(payloads.contains(&stored));
        }

        let names: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("recent_notes_cache.json")]);
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let tmp = tempdir().unwrap();
        let store = FileSharedStore::new(tmp.path());
        assert!(store.write("../escape", b"x").is_err());
        assert!(store.write("", b"x").is_err());
    }
}
