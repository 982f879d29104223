//! Local key/value storage for credentials and display settings
//!
//! Only three keys are ever written: the bearer token, the serialized user
//! record and the serialized display settings. Entities fetched from the
//! backend are never persisted.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::broadcast;

use crate::error::AppResult;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const SETTINGS_KEY: &str = "hotelAppSettings";

const STORAGE_FILE: &str = "local_storage.json";
const EVENT_CAPACITY: usize = 32;

/// Raw string storage
#[cfg_attr(test, mockall::automock)]
pub trait StorageBackend: Send + Sync {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove_item(&self, key: &str) -> AppResult<()>;
}

/// JSON map persisted in a single file, re-read on every access.
/// Writes are read-modify-write without locking; last writer wins.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl AsRef<Path>) -> AppResult<Self> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            path: dir.as_ref().join(STORAGE_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> AppResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => match serde_json::from_str(&content) {
                Ok(map) => Ok(map),
                Err(e) => {
                    tracing::warn!("Local storage file is corrupt, starting empty: {}", e);
                    Ok(BTreeMap::new())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> AppResult<()> {
        let content = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-memory backend
#[derive(Default)]
pub struct MemoryBackend {
    items: Mutex<BTreeMap<String, String>>,
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.remove(key);
        Ok(())
    }
}

/// Change notification, emitted after a key is written or removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub removed: bool,
}

/// Shared handle over a storage backend
#[derive(Clone)]
pub struct LocalStorage {
    backend: Arc<dyn StorageBackend>,
    events: broadcast::Sender<StorageEvent>,
}

impl LocalStorage {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { backend, events }
    }

    /// File-backed storage rooted at `dir`
    pub fn open(dir: impl AsRef<Path>) -> AppResult<Self> {
        Ok(Self::new(Arc::new(FileBackend::new(dir)?)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::default()))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }

    pub fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        self.backend.get_item(key)
    }

    pub fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.backend.set_item(key, value)?;
        self.emit(key, false);
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> AppResult<()> {
        self.backend.remove_item(key)?;
        self.emit(key, true);
        Ok(())
    }

    fn emit(&self, key: &str, removed: bool) {
        // No receivers is fine
        let _ = self.events.send(StorageEvent {
            key: key.to_string(),
            removed,
        });
    }

    /// Read a JSON value; unparseable content is treated as absent
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let Some(raw) = self.get_item(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable value stored under '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }

    pub fn token(&self) -> AppResult<Option<String>> {
        Ok(self.get_item(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    pub fn set_token(&self, token: &str) -> AppResult<()> {
        self.set_item(TOKEN_KEY, token)
    }

    pub fn user<T: DeserializeOwned>(&self) -> AppResult<Option<T>> {
        self.get_json(USER_KEY)
    }

    pub fn set_user<T: Serialize>(&self, user: &T) -> AppResult<()> {
        self.set_json(USER_KEY, user)
    }

    /// Remove token and user record
    pub fn clear_credentials(&self) -> AppResult<()> {
        self.remove_item(TOKEN_KEY)?;
        self.remove_item(USER_KEY)
    }
}
