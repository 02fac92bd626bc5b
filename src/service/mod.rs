//! Orchestration: the game runner service and phase machine.
//!
//! This layer composes the runners into whole-game behavior. It owns the
//! phase transitions, talks to the external repositories declared in
//! [`repos`], and commits one immutable version per mutation round.

pub mod memory;
pub mod phases;
pub mod repos;
pub mod runner;

use crate::runner::RunnerError;
use crate::state::{GamePhase, ValidationError};

pub use memory::{
    InMemoryGameStateRepo, InMemoryGameStateVersionRepo, StaticDecksService, StaticUsersService,
};
pub use phases::{PhaseMachine, WarCard, WarOutcome};
pub use repos::{DecksService, GameStateRepo, GameStateVersionRepo, RepoError, User, UsersService};
pub use runner::{GameRunnerContext, GameRunnerService, PlayerSlot, StartGameRequest};

/// A failure in the orchestration layer.
///
/// Everything here is local to a single game or action; the caller
/// decides whether to retry, reject the player action, or abort the
/// match.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("initial state rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("action requires the {expected:?} phase, game is in {found:?}")]
    WrongPhase { expected: GamePhase, found: GamePhase },

    #[error("game is already complete")]
    GameComplete,
}
