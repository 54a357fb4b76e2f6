//! [`KeybindStore`] implementations.
//!
//! * [`MemoryStore`] keeps bindings in process memory.  Used in tests and
//!   when no settings file is wanted.
//! * [`FileStore`] persists bindings in the JSON [`Config`] document and
//!   rewrites the file on every write.

use crate::config::{Config, ConfigError};
use crate::keybind::Keybinding;
use crate::registry::KeybindKey;
use crate::traits::KeybindStore;
use log::debug;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, RwLock};

/// In-memory store.  Cannot fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<KeybindKey, Keybinding>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries
            .read()
            .map(|e| e.is_empty())
            .unwrap_or_else(|poisoned| poisoned.into_inner().is_empty())
    }
}

impl KeybindStore for MemoryStore {
    type Error = Infallible;

    fn read(&self, key: KeybindKey) -> Result<Keybinding, Infallible> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(entries.get(&key).cloned().unwrap_or_default())
    }

    fn write(&self, key: KeybindKey, value: &Keybinding) -> Result<(), Infallible> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key, value.clone());
        Ok(())
    }
}

/// Errors produced by [`FileStore`].
#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to lock {}: {source}", path.display())]
    Lock {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Store backed by a JSON settings file.
///
/// Reads are served from the copy loaded at [`open`](Self::open) (or the
/// last [`reload`](Self::reload)).  A write takes an exclusive advisory
/// lock on a sibling `<file>.lock`, re-reads the file, applies the change
/// and atomically replaces the file.  Every writer going through
/// `FileStore`, in this process or another, holds the same lock, so no
/// write loses an entry another writer stored.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    config: Mutex<Config>,
}

impl FileStore {
    /// Open the store at `path`.  A missing file is treated as empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FileStoreError> {
        let path = path.as_ref().to_path_buf();
        let config = Config::load_or_default(&path)?;
        debug!(
            "opened keybind store {} ({} entries)",
            path.display(),
            config.keybinds.len()
        );
        Ok(Self {
            path,
            config: Mutex::new(config),
        })
    }

    /// The filesystem path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the settings file, picking up changes made elsewhere.
    pub fn reload(&self) -> Result<(), FileStoreError> {
        let fresh = Config::load_or_default(&self.path)?;
        *self.lock() = fresh;
        Ok(())
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Take the cross-process write lock.  Released when the file drops.
    fn lock_file(&self) -> Result<File, FileStoreError> {
        let path = self.lock_path();
        let lock_err = |source| FileStoreError::Lock {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(lock_err)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(lock_err)?;
        file.lock().map_err(lock_err)?;
        Ok(file)
    }

    fn lock(&self) -> MutexGuard<'_, Config> {
        self.config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeybindStore for FileStore {
    type Error = FileStoreError;

    fn read(&self, key: KeybindKey) -> Result<Keybinding, FileStoreError> {
        Ok(self.lock().keybinds.get(&key).cloned().unwrap_or_default())
    }

    fn write(&self, key: KeybindKey, value: &Keybinding) -> Result<(), FileStoreError> {
        let mut cached = self.lock();
        let _guard = self.lock_file()?;
        let mut next = Config::load_or_default(&self.path)?;
        next.keybinds.insert(key, value.clone());
        next.save(&self.path)?;
        debug!("persisted {} to {}", key, self.path.display());
        *cached = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybind::Chord;
    use tempfile::TempDir;

    fn cmd_1() -> Keybinding {
        Keybinding::new(vec![Chord::from([55, 18])])
    }

    #[test]
    fn memory_store_defaults_to_empty_binding() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.read(KeybindKey::LeftHalf).unwrap(), Keybinding::default());
    }

    #[test]
    fn file_store_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let store = FileStore::open(&path).unwrap();
        store.write(KeybindKey::TopHalf, &cmd_1()).unwrap();

        let on_disk = Config::load(&path).unwrap();
        assert_eq!(on_disk.keybinds[&KeybindKey::TopHalf], cmd_1());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.read(KeybindKey::TopHalf).unwrap(), cmd_1());
    }

    #[test]
    fn file_store_keeps_entries_written_elsewhere() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let a = FileStore::open(&path).unwrap();
        let b = FileStore::open(&path).unwrap();
        a.write(KeybindKey::TopHalf, &cmd_1()).unwrap();
        b.write(KeybindKey::Maximize, &cmd_1()).unwrap();

        let on_disk = Config::load(&path).unwrap();
        assert_eq!(on_disk.keybinds.len(), 2);

        assert_eq!(a.read(KeybindKey::Maximize).unwrap(), Keybinding::default());
        a.reload().unwrap();
        assert_eq!(a.read(KeybindKey::Maximize).unwrap(), cmd_1());
    }

    #[test]
    fn file_store_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(FileStore::open(&path).is_err());
    }

    #[test]
    fn concurrent_writers_lose_no_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let keys = KeybindKey::ALL;
        let (left, right) = keys.split_at(4);

        std::thread::scope(|scope| {
            for keys in [left, right] {
                let path = &path;
                scope.spawn(move || {
                    // Separate stores share nothing in memory, like two processes.
                    let store = FileStore::open(path).unwrap();
                    for round in 0..10u16 {
                        for key in keys {
                            let kb = Keybinding::new(vec![Chord::from([55, round])]);
                            store.write(*key, &kb).unwrap();
                        }
                    }
                });
            }
        });

        let on_disk = Config::load(&path).unwrap();
        assert_eq!(on_disk.keybinds.len(), KeybindKey::ALL.len());
        for key in KeybindKey::ALL {
            assert_eq!(
                on_disk.keybinds[&key],
                Keybinding::new(vec![Chord::from([55, 9])])
            );
        }
    }

    #[test]
    fn write_leaves_lock_file_beside_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let store = FileStore::open(&path).unwrap();
        store.write(KeybindKey::LeftHalf, &cmd_1()).unwrap();
        assert!(dir.path().join("config.json.lock").exists());
    }
}
