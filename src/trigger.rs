//! Turning key presses into window moves.
//!
//! A trigger source (global hotkey listener, CLI, test harness) reports a
//! pressed [`Chord`].  [`resolve`] finds the direction bound to it, and
//! [`Dispatcher`] hands that direction to a [`WindowMover`].  Pressing the
//! repeat trigger advances along the cycle defined by
//! [`next_direction`](crate::catalog::next_direction).

use crate::catalog::{next_direction, Family};
use crate::direction::Direction;
use crate::keybind::Chord;
use crate::registry::{KeybindKey, KeybindRegistry, RegistryError};
use crate::traits::{KeybindStore, WindowMover};
use log::{debug, info};

/// Possible errors from the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The window mover returned an error.
    #[error("window mover error: {0}")]
    Mover(String),
}

/// Find the direction whose keybinding contains exactly `pressed`.
///
/// Directions are tried in [`KeybindKey::ALL`] order; the first match
/// wins.  Returns `None` if no binding matches.
pub fn resolve<S: KeybindStore>(
    registry: &KeybindRegistry<S>,
    pressed: &Chord,
) -> Result<Option<Direction>, RegistryError> {
    for key in KeybindKey::ALL {
        let direction = key.direction();
        if registry.get_keybind(direction)?.matches(pressed) {
            return Ok(Some(direction));
        }
    }
    Ok(None)
}

/// Applies resolved directions through a [`WindowMover`] and remembers the
/// last one for repeat cycling.
pub struct Dispatcher<S: KeybindStore, W: WindowMover> {
    registry: KeybindRegistry<S>,
    mover: W,
    current: Direction,
}

impl<S: KeybindStore, W: WindowMover> Dispatcher<S, W> {
    /// Create a dispatcher.  The cycle position starts at
    /// [`Direction::NoAction`].
    pub fn new(registry: KeybindRegistry<S>, mover: W) -> Self {
        Self {
            registry,
            mover,
            current: Direction::NoAction,
        }
    }

    /// Return a shared reference to the window mover.
    pub fn mover(&self) -> &W {
        &self.mover
    }

    /// The last direction applied, or `NoAction`.
    pub fn current(&self) -> Direction {
        self.current
    }

    /// Handle a pressed chord.
    ///
    /// Returns the direction applied, or `None` if the chord is not bound.
    pub fn press(&mut self, pressed: &Chord) -> Result<Option<Direction>, DispatchError> {
        let Some(direction) = resolve(&self.registry, pressed)? else {
            debug!("chord {} is not bound", pressed);
            return Ok(None);
        };
        info!("chord {} -> {}", pressed, direction);
        self.apply(direction)?;
        Ok(Some(direction))
    }

    /// Advance to the next direction in the repeat cycle.
    ///
    /// When the cycle wraps to `NoAction` the position is reset and no
    /// window is moved.
    pub fn repeat(&mut self) -> Result<Direction, DispatchError> {
        let next = next_direction(self.current);
        debug!("cycle {} -> {}", self.current, next);
        if next == Direction::NoAction {
            self.current = next;
            return Ok(next);
        }
        self.apply(next)?;
        Ok(next)
    }

    /// Move the window to `direction` and make it the cycle position.
    pub fn apply(&mut self, direction: Direction) -> Result<(), DispatchError> {
        if direction == Direction::NoAction {
            self.current = direction;
            return Ok(());
        }
        self.mover
            .snap(direction, Family::of(direction))
            .map_err(|e| DispatchError::Mover(e.to_string()))?;
        self.current = direction;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybind::Keybinding;
    use crate::store::MemoryStore;
    use std::cell::RefCell;

    #[derive(Debug, Default)]
    struct RecordingMover {
        log: RefCell<Vec<(Direction, Option<Family>)>>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock error")]
    struct MockError;

    impl WindowMover for RecordingMover {
        type Error = MockError;

        fn snap(&self, direction: Direction, family: Option<Family>) -> Result<(), MockError> {
            self.log.borrow_mut().push((direction, family));
            Ok(())
        }
    }

    struct FailingMover;

    impl WindowMover for FailingMover {
        type Error = MockError;

        fn snap(&self, _: Direction, _: Option<Family>) -> Result<(), MockError> {
            Err(MockError)
        }
    }

    fn registry() -> KeybindRegistry<MemoryStore> {
        let reg = KeybindRegistry::new(MemoryStore::new());
        reg.set_keybind(Direction::TopHalf, "55+18".parse().unwrap())
            .unwrap();
        reg.set_keybind(Direction::Maximize, "55+58+3, 55+36".parse().unwrap())
            .unwrap();
        reg
    }

    #[test]
    fn resolve_exact_chord() {
        let reg = registry();
        let pressed: Chord = "18+55".parse().unwrap();
        assert_eq!(resolve(&reg, &pressed).unwrap(), Some(Direction::TopHalf));
        let alt: Chord = "36+55".parse().unwrap();
        assert_eq!(resolve(&reg, &alt).unwrap(), Some(Direction::Maximize));
    }

    #[test]
    fn resolve_rejects_subset_and_superset() {
        let reg = registry();
        assert_eq!(resolve(&reg, &Chord::from([55])).unwrap(), None);
        assert_eq!(resolve(&reg, &Chord::from([55, 18, 3])).unwrap(), None);
        assert_eq!(resolve(&reg, &Chord::empty()).unwrap(), None);
    }

    #[test]
    fn resolve_prefers_first_key() {
        let reg = registry();
        reg.set_keybind(Direction::LeftHalf, "55+18".parse().unwrap())
            .unwrap();
        let pressed: Chord = "55+18".parse().unwrap();
        assert_eq!(resolve(&reg, &pressed).unwrap(), Some(Direction::TopHalf));
    }

    #[test]
    fn press_snaps_with_family() {
        let mut d = Dispatcher::new(registry(), RecordingMover::default());
        let applied = d.press(&"55+18".parse().unwrap()).unwrap();
        assert_eq!(applied, Some(Direction::TopHalf));
        assert_eq!(d.current(), Direction::TopHalf);
        assert_eq!(
            *d.mover().log.borrow(),
            vec![(Direction::TopHalf, Some(Family::Halves))]
        );
    }

    #[test]
    fn press_unbound_chord_does_nothing() {
        let mut d = Dispatcher::new(registry(), RecordingMover::default());
        assert_eq!(d.press(&Chord::from([1, 2])).unwrap(), None);
        assert!(d.mover().log.borrow().is_empty());
        assert_eq!(d.current(), Direction::NoAction);
    }

    #[test]
    fn repeat_walks_cycle_and_resets() {
        let mut d = Dispatcher::new(registry(), RecordingMover::default());
        let mut seen = Vec::new();
        for _ in 0..10 {
            seen.push(d.repeat().unwrap());
        }
        assert_eq!(seen.first(), Some(&Direction::TopHalf));
        assert_eq!(seen[8], Direction::Maximize);
        assert_eq!(seen[9], Direction::NoAction);
        // NoAction is never sent to the mover.
        assert_eq!(d.mover().log.borrow().len(), 9);
    }

    #[test]
    fn repeat_after_third_resets() {
        let mut d = Dispatcher::new(registry(), RecordingMover::default());
        d.apply(Direction::LeftThird).unwrap();
        assert_eq!(d.repeat().unwrap(), Direction::NoAction);
        assert_eq!(d.repeat().unwrap(), Direction::TopHalf);
    }

    #[test]
    fn mover_failure_keeps_position() {
        let mut d = Dispatcher::new(registry(), FailingMover);
        let err = d.press(&"55+18".parse().unwrap()).unwrap_err();
        assert!(matches!(err, DispatchError::Mover(_)));
        assert_eq!(d.current(), Direction::NoAction);
    }

    #[test]
    fn unbound_thirds_never_resolve() {
        let reg = registry();
        assert_eq!(
            reg.get_keybind(Direction::LeftThird).unwrap(),
            Keybinding::unbound()
        );
        assert_eq!(resolve(&reg, &Chord::empty()).unwrap(), None);
    }
}
