//! Board coordinates.
//!
//! A `Position` is always inside the 4x4 board; construction validates
//! the range so board indexing never goes out of bounds.

use serde::{Deserialize, Serialize};

/// Board side length. The board is `BOARD_DIM` x `BOARD_DIM` cells.
pub const BOARD_DIM: usize = 4;

/// A validated board coordinate.
///
/// Both axes are in `0..BOARD_DIM`. Use [`Position::new`] to construct;
/// out-of-range coordinates are rejected.
///
/// ```
/// use gridwar::core::Position;
///
/// assert!(Position::new(3, 3).is_some());
/// assert!(Position::new(4, 0).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Create a position, rejecting out-of-range coordinates.
    #[must_use]
    pub fn new(x: usize, y: usize) -> Option<Self> {
        if x < BOARD_DIM && y < BOARD_DIM {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Column index (0..4).
    #[must_use]
    pub const fn x(self) -> usize {
        self.x as usize
    }

    /// Row index (0..4).
    #[must_use]
    pub const fn y(self) -> usize {
        self.y as usize
    }

    /// Iterate every board position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_DIM).flat_map(|y| {
            (0..BOARD_DIM).map(move |x| Position {
                x: x as u8,
                y: y as u8,
            })
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
