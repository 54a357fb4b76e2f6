//! **snapcycle** — the decision core of a window-snapping utility.
//!
//! Given a user action, snapcycle decides which screen region a window
//! should move to next, and which stored keybinding belongs to which
//! region.  Screen geometry and the platform window APIs are not part of
//! this crate.
//!
//! # Architecture
//!
//! * [`direction::Direction`] — the closed set of twenty regions.
//! * [`catalog`] — the repeat cycle and the sibling families (halves,
//!   horizontal thirds, vertical thirds).  Pure functions.
//! * [`registry::KeybindRegistry`] — direction ⇄ keybinding, backed by an
//!   injected [`traits::KeybindStore`].
//! * [`trigger`] — resolves pressed chords and drives a
//!   [`traits::WindowMover`].
//!
//! Concrete stores live in [`store`] (in-memory and JSON file).

pub mod catalog;
pub mod config;
pub mod direction;
pub mod keybind;
pub mod registry;
pub mod store;
pub mod traits;
pub mod trigger;
