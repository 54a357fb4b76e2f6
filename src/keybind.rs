//! Key codes, chords and keybindings.
//!
//! A [`Chord`] is a set of key codes that must all be held at once; order
//! does not matter.  A [`Keybinding`] is an ordered list of alternative
//! chords: pressing any one of them triggers the bound action.
//!
//! # Text format
//!
//! Chords are written as key codes joined by `+`, alternatives separated
//! by `,`:
//!
//! ```text
//! 55+18          one chord: key codes 55 and 18
//! 55+18, 56+19   two alternative chords
//! {}             the empty chord (unbound)
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A platform virtual key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u16);

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error from parsing a chord or keybinding string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseKeybindError {
    #[error("invalid key code {0:?}")]
    KeyCode(String),
    #[error("empty alternative in {0:?}")]
    EmptyAlternative(String),
}

/// Keys that must be held simultaneously.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chord(BTreeSet<KeyCode>);

impl Chord {
    /// The empty chord.  It can never be pressed.
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Whether the chord holds no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key codes in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<KeyCode> for Chord {
    fn from_iter<I: IntoIterator<Item = KeyCode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[u16; N]> for Chord {
    fn from(codes: [u16; N]) -> Self {
        codes.into_iter().map(KeyCode).collect()
    }
}

impl FromStr for Chord {
    type Err = ParseKeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "{}" {
            return Ok(Self::empty());
        }
        s.split('+')
            .map(|part| {
                let part = part.trim();
                part.parse::<u16>()
                    .map(KeyCode)
                    .map_err(|_| ParseKeybindError::KeyCode(part.to_string()))
            })
            .collect()
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("{}");
        }
        let parts: Vec<String> = self.keys().map(|k| k.to_string()).collect();
        f.write_str(&parts.join("+"))
    }
}

/// Alternative chords that trigger one action, in user-defined order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keybinding(Vec<Chord>);

impl Keybinding {
    /// Build a keybinding from chords, keeping their order.
    pub fn new(chords: Vec<Chord>) -> Self {
        Self(chords)
    }

    /// The value reported for actions that cannot be bound: one empty
    /// chord.
    pub fn unbound() -> Self {
        Self(vec![Chord::empty()])
    }

    /// The chords, in order.
    pub fn chords(&self) -> &[Chord] {
        &self.0
    }

    /// Whether no chord in the binding can be pressed.
    pub fn is_unbound(&self) -> bool {
        self.0.iter().all(Chord::is_empty)
    }

    /// Whether `pressed` is exactly one of the configured chords.
    ///
    /// A subset or superset of a configured chord does not match, and the
    /// empty chord never matches.
    pub fn matches(&self, pressed: &Chord) -> bool {
        !pressed.is_empty() && self.0.iter().any(|c| c == pressed)
    }
}

impl FromStr for Keybinding {
    type Err = ParseKeybindError;

    /// Blank input or `{}` on its own is the unbound value.  Inside a
    /// list every alternative must be non-blank; write `{}` for an empty
    /// chord.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::unbound());
        }
        s.split(',')
            .map(|part| {
                if part.trim().is_empty() {
                    return Err(ParseKeybindError::EmptyAlternative(s.to_string()));
                }
                part.parse::<Chord>()
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Keybinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chord_ignores_press_order() {
        assert_eq!(Chord::from([55, 18]), Chord::from([18, 55]));
    }

    #[test]
    fn parse_single_chord() {
        let kb: Keybinding = "55+18".parse().unwrap();
        assert_eq!(kb, Keybinding::new(vec![Chord::from([55, 18])]));
    }

    #[test]
    fn parse_alternatives_keeps_order() {
        let kb: Keybinding = "56+19, 55+18".parse().unwrap();
        assert_eq!(
            kb.chords(),
            &[Chord::from([56, 19]), Chord::from([55, 18])]
        );
    }

    #[test]
    fn parse_empty_chord() {
        let kb: Keybinding = "{}".parse().unwrap();
        assert_eq!(kb, Keybinding::unbound());
        assert!(kb.is_unbound());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(
            "55+cmd".parse::<Chord>(),
            Err(ParseKeybindError::KeyCode("cmd".into()))
        );
        assert!("70000".parse::<Chord>().is_err());
    }

    #[test]
    fn parse_rejects_blank_alternatives() {
        for input in ["55+18,", ",55+18", "55+18,,56+19", "55+18, ,56+19"] {
            assert_eq!(
                input.parse::<Keybinding>(),
                Err(ParseKeybindError::EmptyAlternative(input.into())),
                "{}",
                input
            );
        }
        assert_eq!("".parse::<Keybinding>(), Ok(Keybinding::unbound()));
        assert_eq!("  ".parse::<Keybinding>(), Ok(Keybinding::unbound()));
    }

    #[test]
    fn display_is_sorted_and_parses_back() {
        let kb = Keybinding::new(vec![Chord::from([55, 18]), Chord::empty()]);
        assert_eq!(kb.to_string(), "18+55, {}");
        assert_eq!(kb.to_string().parse::<Keybinding>().unwrap(), kb);
    }

    #[test]
    fn matches_requires_exact_set() {
        let kb = Keybinding::new(vec![Chord::from([55, 18]), Chord::from([56, 19])]);
        assert!(kb.matches(&Chord::from([18, 55])));
        assert!(kb.matches(&Chord::from([56, 19])));
        assert!(!kb.matches(&Chord::from([55])));
        assert!(!kb.matches(&Chord::from([55, 18, 56])));
    }

    #[test]
    fn empty_chord_never_matches() {
        assert!(!Keybinding::unbound().matches(&Chord::empty()));
    }

    #[test]
    fn json_shape() {
        let kb = Keybinding::new(vec![Chord::from([55, 18])]);
        assert_eq!(serde_json::to_string(&kb).unwrap(), "[[18,55]]");
        let back: Keybinding = serde_json::from_str("[[55,18],[]]").unwrap();
        assert_eq!(back, Keybinding::new(vec![Chord::from([55, 18]), Chord::empty()]));
    }
}
