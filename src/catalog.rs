//! Pure queries over [`Direction`]: the repeat cycle and the sibling
//! families.
//!
//! Nothing here holds state.  Every function is total over the closed
//! [`Direction`] set and may be called from any thread.

use crate::direction::Direction;

const HALVES: [Direction; 4] = [
    Direction::TopHalf,
    Direction::RightHalf,
    Direction::BottomHalf,
    Direction::LeftHalf,
];

const HORIZONTAL_THIRDS: [Direction; 5] = [
    Direction::LeftThird,
    Direction::LeftTwoThirds,
    Direction::HorizontalCenterThird,
    Direction::RightTwoThirds,
    Direction::RightThird,
];

const VERTICAL_THIRDS: [Direction; 5] = [
    Direction::TopThird,
    Direction::TopTwoThirds,
    Direction::VerticalCenterThird,
    Direction::BottomTwoThirds,
    Direction::BottomThird,
];

/// Index of the center element in a thirds family.
const CENTER_INDEX: usize = 2;

/// Successor of `current` in the repeat cycle.
///
/// The cycle walks clockwise around the screen, then maximizes, then
/// resets:
///
/// ```text
/// NoAction → TopHalf → TopRightQuarter → RightHalf → BottomRightQuarter
///   → BottomHalf → BottomLeftQuarter → LeftHalf → TopLeftQuarter
///   → Maximize → NoAction
/// ```
///
/// Thirds are not part of the cycle and reset to `NoAction`.
pub fn next_direction(current: Direction) -> Direction {
    match current {
        Direction::NoAction => Direction::TopHalf,
        Direction::TopHalf => Direction::TopRightQuarter,
        Direction::TopRightQuarter => Direction::RightHalf,
        Direction::RightHalf => Direction::BottomRightQuarter,
        Direction::BottomRightQuarter => Direction::BottomHalf,
        Direction::BottomHalf => Direction::BottomLeftQuarter,
        Direction::BottomLeftQuarter => Direction::LeftHalf,
        Direction::LeftHalf => Direction::TopLeftQuarter,
        Direction::TopLeftQuarter => Direction::Maximize,
        Direction::Maximize => Direction::NoAction,

        // Off-cycle: reset.
        Direction::LeftThird
        | Direction::LeftTwoThirds
        | Direction::HorizontalCenterThird
        | Direction::RightTwoThirds
        | Direction::RightThird
        | Direction::TopThird
        | Direction::TopTwoThirds
        | Direction::VerticalCenterThird
        | Direction::BottomTwoThirds
        | Direction::BottomThird => Direction::NoAction,
    }
}

/// The halves family, in rotation order.
pub fn halves() -> &'static [Direction] {
    &HALVES
}

/// The column-thirds family, left to right.  The center third is at
/// index 2.
pub fn horizontal_thirds() -> &'static [Direction] {
    &HORIZONTAL_THIRDS
}

/// The row-thirds family, top to bottom.  The center third is at index 2.
pub fn vertical_thirds() -> &'static [Direction] {
    &VERTICAL_THIRDS
}

/// A group of related directions that snapping logic rotates through when
/// picking a sibling region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Halves,
    HorizontalThirds,
    VerticalThirds,
}

impl Family {
    /// Every family.
    pub const ALL: [Family; 3] = [
        Family::Halves,
        Family::HorizontalThirds,
        Family::VerticalThirds,
    ];

    /// The family `direction` belongs to, if any.
    ///
    /// Quarters, `Maximize` and `NoAction` belong to no family.
    pub fn of(direction: Direction) -> Option<Family> {
        match direction {
            Direction::TopHalf
            | Direction::RightHalf
            | Direction::BottomHalf
            | Direction::LeftHalf => Some(Family::Halves),

            Direction::LeftThird
            | Direction::LeftTwoThirds
            | Direction::HorizontalCenterThird
            | Direction::RightTwoThirds
            | Direction::RightThird => Some(Family::HorizontalThirds),

            Direction::TopThird
            | Direction::TopTwoThirds
            | Direction::VerticalCenterThird
            | Direction::BottomTwoThirds
            | Direction::BottomThird => Some(Family::VerticalThirds),

            Direction::NoAction
            | Direction::Maximize
            | Direction::TopLeftQuarter
            | Direction::TopRightQuarter
            | Direction::BottomRightQuarter
            | Direction::BottomLeftQuarter => None,
        }
    }

    /// Members in family order.
    pub fn members(self) -> &'static [Direction] {
        match self {
            Family::Halves => halves(),
            Family::HorizontalThirds => horizontal_thirds(),
            Family::VerticalThirds => vertical_thirds(),
        }
    }

    /// The center member of a thirds family.  Halves have no center.
    pub fn center(self) -> Option<Direction> {
        match self {
            Family::Halves => None,
            Family::HorizontalThirds | Family::VerticalThirds => {
                self.members().get(CENTER_INDEX).copied()
            }
        }
    }

    /// The member after `direction`, wrapping at the end.
    ///
    /// Returns `None` if `direction` is not in this family.
    pub fn next_sibling(self, direction: Direction) -> Option<Direction> {
        let members = self.members();
        let i = members.iter().position(|d| *d == direction)?;
        Some(members[(i + 1) % members.len()])
    }

    /// The member before `direction`, wrapping at the start.
    ///
    /// Returns `None` if `direction` is not in this family.
    pub fn previous_sibling(self, direction: Direction) -> Option<Direction> {
        let members = self.members();
        let i = members.iter().position(|d| *d == direction)?;
        Some(members[(i + members.len() - 1) % members.len()])
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Family::Halves => write!(f, "halves"),
            Family::HorizontalThirds => write!(f, "horizontal-thirds"),
            Family::VerticalThirds => write!(f, "vertical-thirds"),
        }
    }
}
