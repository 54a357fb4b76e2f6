//! Application configuration.
//!
//! The configuration is a JSON document, by default at
//! `$XDG_CONFIG_HOME/snapcycle/config.json`.  It doubles as the persisted
//! keybinding store: [`FileStore`](crate::store::FileStore) rewrites it on
//! every change.
//!
//! # Example
//!
//! ```json
//! {
//!   "keybinds": {
//!     "topHalf": [[18, 55]],
//!     "maximize": [[3, 55, 58], [36, 55, 58]]
//!   }
//! }
//! ```

use crate::keybind::Keybinding;
use crate::registry::KeybindKey;
use atomic_write_file::AtomicWriteFile;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Top-level configuration.
///
/// Every field is optional: a minimal `{}` file is valid and means "no
/// bindings".  Unknown top-level sections and `keybinds` entries this
/// version does not understand are skipped with a warning, and written
/// back untouched by [`save`](Self::save).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Stored keybindings, one entry per bound key.
    pub keybinds: BTreeMap<KeybindKey, Keybinding>,
    /// `keybinds` entries with an unknown name or an unreadable value.
    unrecognized: BTreeMap<String, Value>,
    /// Top-level sections other than `keybinds`.
    extra: BTreeMap<String, Value>,
}

/// On-disk shape, before keybind names are checked.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    keybinds: BTreeMap<String, Value>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum KeybindEntry<'a> {
    Known(&'a Keybinding),
    Foreign(&'a Value),
}

#[derive(Serialize)]
struct ConfigOut<'a> {
    keybinds: BTreeMap<&'a str, KeybindEntry<'a>>,
    #[serde(flatten)]
    extra: &'a BTreeMap<String, Value>,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let mut keybinds = BTreeMap::new();
        let mut unrecognized = BTreeMap::new();
        for (name, value) in raw.keybinds {
            let Some(key) = KeybindKey::from_name(&name) else {
                warn!("ignoring keybind for unknown key {:?}", name);
                unrecognized.insert(name, value);
                continue;
            };
            match Keybinding::deserialize(&value) {
                Ok(keybind) => {
                    keybinds.insert(key, keybind);
                }
                Err(e) => {
                    warn!("ignoring malformed keybind {:?}: {}", name, e);
                    unrecognized.insert(name, value);
                }
            }
        }
        Self {
            keybinds,
            unrecognized,
            extra: raw.extra,
        }
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawConfig::deserialize(deserializer).map(Self::from)
    }
}

impl Serialize for Config {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut keybinds: BTreeMap<&str, KeybindEntry<'_>> = self
            .unrecognized
            .iter()
            .map(|(name, value)| (name.as_str(), KeybindEntry::Foreign(value)))
            .collect();
        for (key, keybind) in &self.keybinds {
            keybinds.insert(key.as_str(), KeybindEntry::Known(keybind));
        }
        ConfigOut {
            keybinds,
            extra: &self.extra,
        }
        .serialize(serializer)
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        Self::parse(path, &contents)
    }

    /// Load `path`, or return the defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(path, &contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError(format!("failed to read {}: {}", path.display(), e))),
        }
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Names of `keybinds` entries that were skipped on load.
    pub fn unrecognized_keybinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.unrecognized.keys().map(String::as_str)
    }

    /// Write the configuration to `path`, replacing the file atomically.
    ///
    /// The parent directory is created if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError(format!("failed to create {}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError(format!("failed to serialize config: {}", e)))?;

        let mut file = AtomicWriteFile::options()
            .open(path)
            .map_err(|e| ConfigError(format!("failed to open {}: {}", path.display(), e)))?;
        file.write_all(json.as_bytes())
            .map_err(|e| ConfigError(format!("failed to write {}: {}", path.display(), e)))?;
        file.commit()
            .map_err(|e| ConfigError(format!("failed to commit {}: {}", path.display(), e)))?;
        Ok(())
    }
}

/// Error from loading, parsing or saving a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
