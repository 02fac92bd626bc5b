//! In-memory collaborator implementations.
//!
//! Back the repository and lookup traits with plain maps, for tests and
//! for driving a game without a persistence layer.

use rustc_hash::FxHashMap;

use crate::cards::Deck;
use crate::core::{DeckId, GameStateId, UserId};
use crate::state::{GameState, GameStateVersion};

use super::repos::{
    DecksService, GameStateRepo, GameStateVersionRepo, RepoError, User, UsersService,
};

/// Map-backed [`GameStateRepo`].
#[derive(Clone, Debug, Default)]
pub struct InMemoryGameStateRepo {
    states: FxHashMap<GameStateId, GameState>,
}

impl InMemoryGameStateRepo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStateRepo for InMemoryGameStateRepo {
    fn get(&self, id: GameStateId) -> Result<GameState, RepoError> {
        self.states.get(&id).cloned().ok_or(RepoError::NotFound {
            kind: "game state",
            id: id.raw(),
        })
    }

    fn create(&mut self, state: &GameState) -> Result<(), RepoError> {
        self.states.insert(state.id, state.clone());
        Ok(())
    }

    fn update(&mut self, state: &GameState) -> Result<(), RepoError> {
        if !self.states.contains_key(&state.id) {
            return Err(RepoError::NotFound {
                kind: "game state",
                id: state.id.raw(),
            });
        }
        self.states.insert(state.id, state.clone());
        Ok(())
    }

    fn delete(&mut self, id: GameStateId) -> Result<(), RepoError> {
        self.states.remove(&id).map(|_| ()).ok_or(RepoError::NotFound {
            kind: "game state",
            id: id.raw(),
        })
    }

    fn all(&self) -> Result<Vec<GameState>, RepoError> {
        Ok(self.states.values().cloned().collect())
    }
}

/// Append-only, vec-backed [`GameStateVersionRepo`].
#[derive(Clone, Debug, Default)]
pub struct InMemoryGameStateVersionRepo {
    versions: Vec<GameStateVersion>,
}

impl InMemoryGameStateVersionRepo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored versions, across all games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// True when no versions are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl GameStateVersionRepo for InMemoryGameStateVersionRepo {
    fn create(&mut self, version: &GameStateVersion) -> Result<(), RepoError> {
        self.versions.push(version.clone());
        Ok(())
    }

    fn versions_for(&self, game_state: GameStateId) -> Result<Vec<GameStateVersion>, RepoError> {
        Ok(self
            .versions
            .iter()
            .filter(|v| v.state.id == game_state)
            .cloned()
            .collect())
    }

    fn latest_version(&self, game_state: GameStateId) -> Result<GameStateVersion, RepoError> {
        self.versions
            .iter()
            .rev()
            .find(|v| v.state.id == game_state)
            .cloned()
            .ok_or(RepoError::NotFound {
                kind: "game state version",
                id: game_state.raw(),
            })
    }
}

/// Fixed-map [`DecksService`].
#[derive(Clone, Debug, Default)]
pub struct StaticDecksService {
    decks: FxHashMap<DeckId, Deck>,
}

impl StaticDecksService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a deck for lookup.
    pub fn insert(&mut self, deck: Deck) {
        self.decks.insert(deck.id, deck);
    }
}

impl DecksService for StaticDecksService {
    fn get_deck(&self, id: DeckId) -> Result<Deck, RepoError> {
        self.decks.get(&id).cloned().ok_or(RepoError::NotFound {
            kind: "deck",
            id: id.raw(),
        })
    }
}

/// Fixed-map [`UsersService`].
#[derive(Clone, Debug, Default)]
pub struct StaticUsersService {
    users: FxHashMap<UserId, User>,
}

impl StaticUsersService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user for lookup.
    pub fn insert(&mut self, user: User) {
        self.users.insert(user.id, user);
    }
}

impl UsersService for StaticUsersService {
    fn get_user(&self, id: UserId) -> Result<User, RepoError> {
        self.users.get(&id).cloned().ok_or(RepoError::NotFound {
            kind: "user",
            id: id.raw(),
        })
    }
}
