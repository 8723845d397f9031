//! Directory-backed store for native builds.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::{CacheError, Store};

const ENTRY_EXTENSION: &str = "kv";

/// Store that keeps one file per key inside a directory.
///
/// Keys are encoded as URL-safe base64 so any string is a valid key and no
/// key can escape the directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// Directory holding the entries.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, CacheError> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        let name = format!("{}.{}", URL_SAFE_NO_PAD.encode(key), ENTRY_EXTENSION);
        Ok(self.root.join(name))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.entry_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::StoreError(format!("read {}: {}", path.display(), e))),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.entry_path(key)?;
        fs::write(&path, value)
            .map_err(|e| CacheError::StoreError(format!("write {}: {}", path.display(), e)))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::StoreError(format!("delete {}: {}", path.display(), e))),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entry_path(key)?.is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let dir = fs::read_dir(&self.root)
            .map_err(|e| CacheError::StoreError(format!("list {}: {}", self.root.display(), e)))?;

        let mut keys = Vec::new();
        for entry in dir {
            let entry = entry.map_err(|e| CacheError::StoreError(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // Skip files this store did not write.
            match URL_SAFE_NO_PAD.decode(stem).ok().and_then(|b| String::from_utf8(b).ok()) {
                Some(key) => keys.push(key),
                None => tracing::debug!(path = %path.display(), "ignoring foreign file in store"),
            }
        }
        keys.sort();
        Ok(keys)
    }
}
