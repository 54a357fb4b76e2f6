//! Seams to the collaborators snapcycle does not implement itself.
//!
//! The [`KeybindRegistry`](crate::registry::KeybindRegistry) only talks to
//! settings storage through [`KeybindStore`], and the
//! [`Dispatcher`](crate::trigger::Dispatcher) only moves windows through
//! [`WindowMover`].  Concrete stores live in [`store`](crate::store);
//! geometry and the platform window APIs are left to the embedding
//! application.

use crate::catalog::Family;
use crate::direction::Direction;
use crate::keybind::Keybinding;
use crate::registry::KeybindKey;

/// Persistent configuration storage for keybindings, one entry per
/// [`KeybindKey`].
///
/// Implementations must make a single `read` or `write` atomic with respect
/// to other readers and writers of the same key, including other processes
/// if the backing storage is shared.
pub trait KeybindStore {
    /// The error type produced by this store.
    type Error: std::error::Error + Send + 'static;

    /// Return the stored binding for `key`, or an empty [`Keybinding`] if
    /// nothing was ever stored.
    fn read(&self, key: KeybindKey) -> Result<Keybinding, Self::Error>;

    /// Replace the binding for `key` and persist it before returning.
    fn write(&self, key: KeybindKey, value: &Keybinding) -> Result<(), Self::Error>;
}

/// Abstraction over whatever turns a [`Direction`] into a window frame
/// and applies it.
///
/// `family` is the sibling group the direction belongs to, if any, so the
/// mover can tell for instance that a center third is being requested.
pub trait WindowMover {
    /// The error type produced by this mover.
    type Error: std::error::Error + Send + 'static;

    /// Snap the focused window to `direction`.
    fn snap(&self, direction: Direction, family: Option<Family>) -> Result<(), Self::Error>;
}
