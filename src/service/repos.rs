//! Interfaces required from external collaborators.
//!
//! The core performs no I/O; persistence of states and versions, and
//! user/deck lookup, are supplied by the orchestrating service through
//! these traits. The caller's repository layer owns commit atomicity: a
//! state write must pair with exactly one version-log append, or neither.

use crate::cards::Deck;
use crate::core::{DeckId, GameStateId, Metadata, UserId};
use crate::state::{GameState, GameStateVersion};

/// A failure reported by a collaborator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    #[error("storage failure: {0}")]
    Storage(String),
}

/// A registered user, as resolved by the users service.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub metadata: Metadata,
}

impl User {
    /// Create a bare user record.
    #[must_use]
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            email: None,
            first_name: None,
            last_name: None,
            metadata: Metadata::now(),
        }
    }
}

/// Persistence of the current state per game.
pub trait GameStateRepo {
    fn get(&self, id: GameStateId) -> Result<GameState, RepoError>;
    fn create(&mut self, state: &GameState) -> Result<(), RepoError>;
    fn update(&mut self, state: &GameState) -> Result<(), RepoError>;
    fn delete(&mut self, id: GameStateId) -> Result<(), RepoError>;
    fn all(&self) -> Result<Vec<GameState>, RepoError>;
}

/// Append-only version log, the only historical record.
pub trait GameStateVersionRepo {
    fn create(&mut self, version: &GameStateVersion) -> Result<(), RepoError>;
    fn versions_for(&self, game_state: GameStateId) -> Result<Vec<GameStateVersion>, RepoError>;
    fn latest_version(&self, game_state: GameStateId) -> Result<GameStateVersion, RepoError>;
}

/// Deck lookup, consulted only during game initialization.
pub trait DecksService {
    fn get_deck(&self, id: DeckId) -> Result<Deck, RepoError>;
}

/// User lookup, consulted only during game initialization.
pub trait UsersService {
    fn get_user(&self, id: UserId) -> Result<User, RepoError>;
}
