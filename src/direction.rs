//! The closed set of window-region directions.
//!
//! A [`Direction`] names a screen region a window can be snapped to.  The
//! set is fixed: every consumer in this crate matches on all twenty
//! variants, so adding one is a compile error until each consumer decides
//! what to do with it.
//!
//! Text forms accepted by [`Direction::from_str`] (and by the serde
//! deserializer) are case-insensitive and ignore `-`, `_` and whitespace,
//! so `"top-half"`, `"TopHalf"` and `"top_half"` all parse to
//! [`Direction::TopHalf`].

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A target region for a snapped window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Direction {
    /// Sentinel: no layout.  Start and end of the repeat cycle.
    NoAction,
    Maximize,

    // Halves
    TopHalf,
    RightHalf,
    BottomHalf,
    LeftHalf,

    // Quarters
    TopLeftQuarter,
    TopRightQuarter,
    BottomRightQuarter,
    BottomLeftQuarter,

    // Horizontal thirds (columns)
    LeftThird,
    LeftTwoThirds,
    HorizontalCenterThird,
    RightTwoThirds,
    RightThird,

    // Vertical thirds (rows)
    TopThird,
    TopTwoThirds,
    VerticalCenterThird,
    BottomTwoThirds,
    BottomThird,
}

impl Direction {
    /// Every direction, in declaration order.
    pub const ALL: [Direction; 20] = [
        Direction::NoAction,
        Direction::Maximize,
        Direction::TopHalf,
        Direction::RightHalf,
        Direction::BottomHalf,
        Direction::LeftHalf,
        Direction::TopLeftQuarter,
        Direction::TopRightQuarter,
        Direction::BottomRightQuarter,
        Direction::BottomLeftQuarter,
        Direction::LeftThird,
        Direction::LeftTwoThirds,
        Direction::HorizontalCenterThird,
        Direction::RightTwoThirds,
        Direction::RightThird,
        Direction::TopThird,
        Direction::TopTwoThirds,
        Direction::VerticalCenterThird,
        Direction::BottomTwoThirds,
        Direction::BottomThird,
    ];

    /// Human-readable label for menus and settings screens.
    ///
    /// [`NoAction`](Direction::NoAction) is not user-facing and has no
    /// name.
    pub fn display_name(self) -> Option<&'static str> {
        let name = match self {
            Direction::NoAction => return None,
            Direction::Maximize => "Maximize",
            Direction::TopHalf => "Top Half",
            Direction::RightHalf => "Right Half",
            Direction::BottomHalf => "Bottom Half",
            Direction::LeftHalf => "Left Half",
            Direction::TopLeftQuarter => "Top Left Quarter",
            Direction::TopRightQuarter => "Top Right Quarter",
            Direction::BottomRightQuarter => "Bottom Right Quarter",
            Direction::BottomLeftQuarter => "Bottom Left Quarter",
            Direction::LeftThird => "Left Third",
            Direction::LeftTwoThirds => "Left Two Thirds",
            Direction::HorizontalCenterThird => "Horizontal Center Third",
            Direction::RightTwoThirds => "Right Two Thirds",
            Direction::RightThird => "Right Third",
            Direction::TopThird => "Top Third",
            Direction::TopTwoThirds => "Top Two Thirds",
            Direction::VerticalCenterThird => "Vertical Center Third",
            Direction::BottomTwoThirds => "Bottom Two Thirds",
            Direction::BottomThird => "Bottom Third",
        };
        Some(name)
    }

    /// Successor in the repeat cycle.  See [`crate::catalog::next_direction`].
    pub fn next(self) -> Direction {
        crate::catalog::next_direction(self)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::NoAction => "no-action",
            Direction::Maximize => "maximize",
            Direction::TopHalf => "top-half",
            Direction::RightHalf => "right-half",
            Direction::BottomHalf => "bottom-half",
            Direction::LeftHalf => "left-half",
            Direction::TopLeftQuarter => "top-left-quarter",
            Direction::TopRightQuarter => "top-right-quarter",
            Direction::BottomRightQuarter => "bottom-right-quarter",
            Direction::BottomLeftQuarter => "bottom-left-quarter",
            Direction::LeftThird => "left-third",
            Direction::LeftTwoThirds => "left-two-thirds",
            Direction::HorizontalCenterThird => "horizontal-center-third",
            Direction::RightTwoThirds => "right-two-thirds",
            Direction::RightThird => "right-third",
            Direction::TopThird => "top-third",
            Direction::TopTwoThirds => "top-two-thirds",
            Direction::VerticalCenterThird => "vertical-center-third",
            Direction::BottomTwoThirds => "bottom-two-thirds",
            Direction::BottomThird => "bottom-third",
        };
        f.write_str(s)
    }
}

/// Error returned when a string names no [`Direction`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {0:?}")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(|c| c.to_lowercase())
            .collect();
        Direction::ALL
            .iter()
            .copied()
            .find(|d| {
                let canonical: String = d.to_string().chars().filter(|c| *c != '-').collect();
                canonical == normalized
            })
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}
