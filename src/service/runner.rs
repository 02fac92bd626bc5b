//! The game runner service.
//!
//! Owns the external collaborators, builds new games, and hands out
//! per-game contexts. A context mutates a loaded `GameState` in memory
//! through the runner layer and the phase machine; `commit` writes the
//! state back and appends exactly one version-log entry.

use tracing::{debug, instrument};

use crate::cards::CardRegistry;
use crate::core::{DeckId, GameStateId, Position, UserId};
use crate::runner::{ApplyOutcome, EffectGate, PlayerRunner};
use crate::state::{
    GamePhase, GameState, GameStateData, GameStateVersion, PlayerState, Rules, Seat,
};

use super::phases::PhaseMachine;
use super::repos::{DecksService, GameStateRepo, GameStateVersionRepo, UsersService};
use super::ServiceError;

/// One seat's user and chosen deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSlot {
    pub user: UserId,
    pub deck: DeckId,
}

impl PlayerSlot {
    #[must_use]
    pub fn new(user: UserId, deck: DeckId) -> Self {
        Self { user, deck }
    }
}

/// Everything needed to start a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartGameRequest {
    pub player1: PlayerSlot,
    pub player2: PlayerSlot,
}

/// Orchestrates games over the four collaborator traits.
#[derive(Clone, Debug)]
pub struct GameRunnerService<R, V, D, U> {
    states: R,
    versions: V,
    decks: D,
    users: U,
}

impl<R, V, D, U> GameRunnerService<R, V, D, U>
where
    R: GameStateRepo,
    V: GameStateVersionRepo,
    D: DecksService,
    U: UsersService,
{
    #[must_use]
    pub fn new(states: R, versions: V, decks: D, users: U) -> Self {
        Self {
            states,
            versions,
            decks,
            users,
        }
    }

    /// Start a match: resolve both users and decks, shuffle and deal,
    /// seed the board, and persist the initial state with its first
    /// version. A failed lookup aborts before anything is persisted.
    #[instrument(level = "debug", skip(self), fields(
        player1 = request.player1.user.raw(),
        player2 = request.player2.user.raw(),
    ))]
    pub fn initialize_game(
        &mut self,
        request: &StartGameRequest,
    ) -> Result<GameState, ServiceError> {
        let user1 = self.users.get_user(request.player1.user)?;
        let user2 = self.users.get_user(request.player2.user)?;
        let deck1 = self.decks.get_deck(request.player1.deck)?;
        let deck2 = self.decks.get_deck(request.player2.deck)?;

        let rules = Rules::default();
        let state = GameState::new([
            PlayerState::new(user1.id, &deck1, &rules),
            PlayerState::new(user2.id, &deck2, &rules),
        ]);
        state.data.validate()?;

        self.states.create(&state)?;
        self.versions.create(&GameStateVersion::new(&state))?;
        debug!(game = state.id.raw(), "game initialized");
        Ok(state)
    }

    /// The backing state repository.
    #[must_use]
    pub fn states(&self) -> &R {
        &self.states
    }

    /// The backing version log.
    #[must_use]
    pub fn versions(&self) -> &V {
        &self.versions
    }

    /// Load a game into a mutating context.
    pub fn context(&mut self, id: GameStateId) -> Result<GameRunnerContext<'_, R, V>, ServiceError> {
        let state = self.states.get(id)?;
        Ok(GameRunnerContext {
            states: &mut self.states,
            versions: &mut self.versions,
            state,
        })
    }
}

/// A loaded game plus the repositories its commits go to.
///
/// All mutation on one game goes through one context at a time; two
/// distinct games are independent and may be driven concurrently by
/// separate owners.
pub struct GameRunnerContext<'a, R, V> {
    states: &'a mut R,
    versions: &'a mut V,
    state: GameState,
}

impl<R, V> GameRunnerContext<'_, R, V>
where
    R: GameStateRepo,
    V: GameStateVersionRepo,
{
    /// The loaded aggregate.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The battle state.
    #[must_use]
    pub fn game_state_data(&self) -> &GameStateData {
        &self.state.data
    }

    /// One seat's player state.
    #[must_use]
    pub fn player_state(&self, seat: Seat) -> &PlayerState {
        self.state.data.player(seat)
    }

    /// Apply a closure to one seat's player state.
    pub fn update_player_state(&mut self, seat: Seat, update: impl FnOnce(&mut PlayerState)) {
        update(self.state.data.player_mut(seat));
    }

    /// Apply a closure to the whole battle state.
    pub fn update_state(&mut self, update: impl FnOnce(&mut GameStateData)) {
        update(&mut self.state.data);
    }

    /// A player runner for one seat, dispatching through `registry`.
    pub fn player<'r>(&'r mut self, seat: Seat, registry: &'r CardRegistry) -> PlayerRunner<'r> {
        PlayerRunner::new(&mut self.state.data, seat, EffectGate::new(registry))
    }

    /// Record a seat's War selection (Reveal phase only).
    pub fn select_card(
        &mut self,
        seat: Seat,
        position: Position,
        registry: &CardRegistry,
    ) -> Result<ApplyOutcome, ServiceError> {
        PhaseMachine::new(&mut self.state.data, registry).select_card(seat, position)
    }

    /// Move the game one phase forward.
    pub fn advance_phase(&mut self, registry: &CardRegistry) -> Result<GamePhase, ServiceError> {
        PhaseMachine::new(&mut self.state.data, registry).advance()
    }

    /// Write the current state back and append one version-log entry.
    ///
    /// The repositories own atomicity across the pair; the core only
    /// promises to ask for exactly one append per commit.
    pub fn commit(&mut self) -> Result<(), ServiceError> {
        self.state.metadata.touch();
        self.states.update(&self.state)?;
        self.versions.create(&GameStateVersion::new(&self.state))?;
        debug!(
            game = self.state.id.raw(),
            round = self.state.data.round_number,
            phase = ?self.state.data.phase,
            "committed"
        );
        Ok(())
    }
}
