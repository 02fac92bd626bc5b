//! The game-state data model: players, board, effects audit, aggregate.

pub mod board;
pub mod game;
pub mod player;

pub use board::{BoardSpace, BoardState};
pub use game::{
    CompletionState, EffectContext, EffectsState, GamePhase, GameState, GameStateData,
    GameStateVersion, Rules, ValidationError,
};
pub use player::{Hand, PlayerState, Seat};
