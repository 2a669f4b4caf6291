//! Key-value persistence layer.
//!
//! The sole wire format: JSON documents stored under string keys. Snapshot
//! writes either fully succeed or fully fail; no partial writes are
//! observable.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use anyhow::Context;

/// String-keyed JSON document storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        (**self).remove(key)
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let map = self
            .inner
            .read()
            .map_err(|_| anyhow::anyhow!("key-value store lock poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| anyhow::anyhow!("key-value store lock poisoned"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| anyhow::anyhow!("key-value store lock poisoned"))?;
        map.remove(key);
        Ok(())
    }
}

/// File-backed store: one `<key>.json` document per key under a data
/// directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory at {dir:?}"))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("failed to read {path:?}")),
        }
    }

    fn put(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        // Write-then-rename so the document is replaced whole or not at all.
        let staging = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&staging, value)
            .with_context(|| format!("failed to write snapshot to {staging:?}"))?;
        fs::rename(&staging, &path)
            .with_context(|| format!("failed to move snapshot into place at {path:?}"))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("failed to remove {path:?}")),
        }
    }
}
