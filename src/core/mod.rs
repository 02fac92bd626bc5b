//! Foundation types: identifiers, board coordinates, record timestamps.

pub mod id;
pub mod metadata;
pub mod position;

pub use id::{CardId, DeckId, GameStateId, GameStateVersionId, UserId};
pub use metadata::Metadata;
pub use position::{Position, BOARD_DIM};
