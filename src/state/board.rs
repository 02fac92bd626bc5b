//! The 4x4 board.
//!
//! Cells are addressed exclusively through validated [`Position`]s, so
//! indexing can never go out of bounds. Storage is row-major.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{CardId, Position, UserId, BOARD_DIM};

/// One board cell.
///
/// An empty cell holds no card and, once cleared, no owner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSpace {
    pub card: Option<CardId>,
    pub revealed: bool,
    pub owner: Option<UserId>,
}

impl BoardSpace {
    /// True when no card occupies the cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.card.is_none()
    }
}

/// Board cells plus the record of cleared positions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    board: [[BoardSpace; BOARD_DIM]; BOARD_DIM],
    pub cleared_spaces: FxHashSet<Position>,
}

impl BoardState {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell at a position.
    #[must_use]
    pub fn space(&self, position: Position) -> &BoardSpace {
        &self.board[position.y()][position.x()]
    }

    /// Mutable access to the cell at a position.
    pub fn space_mut(&mut self, position: Position) -> &mut BoardSpace {
        &mut self.board[position.y()][position.x()]
    }

    /// True iff the cell holds no card.
    #[must_use]
    pub fn is_empty_space(&self, position: Position) -> bool {
        self.space(position).is_empty()
    }

    /// Positions whose cards are currently face-up.
    pub fn revealed_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(|p| {
            let space = self.space(*p);
            space.revealed && !space.is_empty()
        })
    }

    /// Find the position holding a card, if it is on the board.
    #[must_use]
    pub fn position_of(&self, card: CardId) -> Option<Position> {
        Position::all().find(|p| self.space(*p).card == Some(card))
    }

    /// True once every cell has been cleared.
    #[must_use]
    pub fn is_fully_cleared(&self) -> bool {
        self.cleared_spaces.len() == BOARD_DIM * BOARD_DIM
    }
}
