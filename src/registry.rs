//! Lookup and update of the keybinding for each [`Direction`].
//!
//! Only `Maximize`, the four halves and the four quarters can be bound.
//! Everything else, thirds included, reports [`Keybinding::unbound`] and
//! silently ignores writes.  Callers can therefore iterate over
//! [`Direction::ALL`] without special-casing anything.

use crate::direction::Direction;
use crate::keybind::Keybinding;
use crate::traits::KeybindStore;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Possible errors from the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The backing store returned an error.
    #[error("keybind store error: {0}")]
    Store(String),
}

/// Configuration key for one bindable direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeybindKey {
    Maximize,
    TopHalf,
    RightHalf,
    BottomHalf,
    LeftHalf,
    TopLeftQuarter,
    TopRightQuarter,
    BottomRightQuarter,
    BottomLeftQuarter,
}

impl KeybindKey {
    /// Every key.
    pub const ALL: [KeybindKey; 9] = [
        KeybindKey::Maximize,
        KeybindKey::TopHalf,
        KeybindKey::RightHalf,
        KeybindKey::BottomHalf,
        KeybindKey::LeftHalf,
        KeybindKey::TopLeftQuarter,
        KeybindKey::TopRightQuarter,
        KeybindKey::BottomRightQuarter,
        KeybindKey::BottomLeftQuarter,
    ];

    /// The key whose settings name is `name`, e.g. `"topHalf"`.
    pub fn from_name(name: &str) -> Option<KeybindKey> {
        KeybindKey::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// The store key for `direction`, or `None` if it cannot be bound.
    pub fn for_direction(direction: Direction) -> Option<KeybindKey> {
        match direction {
            Direction::Maximize => Some(KeybindKey::Maximize),
            Direction::TopHalf => Some(KeybindKey::TopHalf),
            Direction::RightHalf => Some(KeybindKey::RightHalf),
            Direction::BottomHalf => Some(KeybindKey::BottomHalf),
            Direction::LeftHalf => Some(KeybindKey::LeftHalf),
            Direction::TopLeftQuarter => Some(KeybindKey::TopLeftQuarter),
            Direction::TopRightQuarter => Some(KeybindKey::TopRightQuarter),
            Direction::BottomRightQuarter => Some(KeybindKey::BottomRightQuarter),
            Direction::BottomLeftQuarter => Some(KeybindKey::BottomLeftQuarter),

            // Not user-bindable.  Thirds are reached through family
            // rotation, never through their own shortcut.
            Direction::NoAction
            | Direction::LeftThird
            | Direction::LeftTwoThirds
            | Direction::HorizontalCenterThird
            | Direction::RightTwoThirds
            | Direction::RightThird
            | Direction::TopThird
            | Direction::TopTwoThirds
            | Direction::VerticalCenterThird
            | Direction::BottomTwoThirds
            | Direction::BottomThird => None,
        }
    }

    /// The direction this key binds.
    pub fn direction(self) -> Direction {
        match self {
            KeybindKey::Maximize => Direction::Maximize,
            KeybindKey::TopHalf => Direction::TopHalf,
            KeybindKey::RightHalf => Direction::RightHalf,
            KeybindKey::BottomHalf => Direction::BottomHalf,
            KeybindKey::LeftHalf => Direction::LeftHalf,
            KeybindKey::TopLeftQuarter => Direction::TopLeftQuarter,
            KeybindKey::TopRightQuarter => Direction::TopRightQuarter,
            KeybindKey::BottomRightQuarter => Direction::BottomRightQuarter,
            KeybindKey::BottomLeftQuarter => Direction::BottomLeftQuarter,
        }
    }

    /// Name of the key in the settings document.
    pub fn as_str(self) -> &'static str {
        match self {
            KeybindKey::Maximize => "maximize",
            KeybindKey::TopHalf => "topHalf",
            KeybindKey::RightHalf => "rightHalf",
            KeybindKey::BottomHalf => "bottomHalf",
            KeybindKey::LeftHalf => "leftHalf",
            KeybindKey::TopLeftQuarter => "topLeftQuarter",
            KeybindKey::TopRightQuarter => "topRightQuarter",
            KeybindKey::BottomRightQuarter => "bottomRightQuarter",
            KeybindKey::BottomLeftQuarter => "bottomLeftQuarter",
        }
    }
}

impl fmt::Display for KeybindKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps directions to their keybindings through an injected
/// [`KeybindStore`].
///
/// The registry holds no copy of the bindings: every read goes to the
/// store and every write is persisted by the store before
/// [`set_keybind`](Self::set_keybind) returns.
///
/// ```ignore
/// let registry = KeybindRegistry::new(MemoryStore::new());
/// registry.set_keybind(Direction::TopHalf, "55+18".parse()?)?;
/// assert!(registry.get_keybind(Direction::TopHalf)?.matches(&"18+55".parse()?));
/// ```
pub struct KeybindRegistry<S: KeybindStore> {
    store: S,
}

impl<S: KeybindStore> KeybindRegistry<S> {
    /// Create a registry backed by `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Return a shared reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether `direction` can carry a keybinding.
    pub fn is_bindable(direction: Direction) -> bool {
        KeybindKey::for_direction(direction).is_some()
    }

    /// The chords that trigger `direction`.
    ///
    /// Non-bindable directions always yield [`Keybinding::unbound`] without
    /// touching the store.
    pub fn get_keybind(&self, direction: Direction) -> Result<Keybinding, RegistryError> {
        match KeybindKey::for_direction(direction) {
            Some(key) => self
                .store
                .read(key)
                .map_err(|e| RegistryError::Store(e.to_string())),
            None => Ok(Keybinding::unbound()),
        }
    }

    /// Replace the chords that trigger `direction` and persist them.
    ///
    /// For non-bindable directions this is a no-op.
    pub fn set_keybind(&self, direction: Direction, value: Keybinding) -> Result<(), RegistryError> {
        let Some(key) = KeybindKey::for_direction(direction) else {
            debug!("ignoring keybind for non-bindable direction {}", direction);
            return Ok(());
        };
        info!("set keybind {} = {}", key, value);
        self.store
            .write(key, &value)
            .map_err(|e| RegistryError::Store(e.to_string()))
    }
}
