//! The game-state aggregate.
//!
//! `GameStateData` is the full serializable battle state: both players,
//! the board, the effects audit stack, completion, and the per-game rule
//! constants. `GameState` wraps it with identity and timestamps; every
//! committed mutation round snapshots into a `GameStateVersion`.

use im::Vector;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{CardId, GameStateId, GameStateVersionId, Metadata, Position, UserId};

use super::board::{BoardSpace, BoardState};
use super::player::{PlayerState, Seat};

pub const ROUND_LIMIT: u32 = 15;
pub const ROUND_TIMER_SECS: u32 = 15;
pub const STARTING_HAND_SIZE: usize = 3;
pub const HAND_LIMIT: usize = 5;
pub const DECK_LIMIT: usize = 52;
pub const DRAW_LIMIT: u32 = 1;

/// The coarse game state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Setup,
    /// Players may swap/discard/draw, each at most once.
    CardAction,
    /// Timed selection window for the upcoming War.
    Reveal,
    /// Card comparison and effect resolution.
    War,
    /// Clear revealed cards, advance the round, check game end.
    Cleanup,
}

/// Immutable per-game rule constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub round_limit: u32,
    pub round_timer_secs: u32,
    pub hand_limit: usize,
    pub starting_hand_size: usize,
    /// Bounds the initial deck size only; decks shrink as cards leave.
    pub deck_limit: usize,
    pub draw_limit: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            round_limit: ROUND_LIMIT,
            round_timer_secs: ROUND_TIMER_SECS,
            hand_limit: HAND_LIMIT,
            starting_hand_size: STARTING_HAND_SIZE,
            deck_limit: DECK_LIMIT,
            draw_limit: DRAW_LIMIT,
        }
    }
}

/// Whether the game has finished, and who won.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionState {
    pub is_complete: bool,
    pub winner: Option<UserId>,
}

/// Audit record of a triggered effect: who, what, when, where.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectContext {
    /// Position of the triggering card.
    pub trigger: Position,
    /// Position of the target card, if any.
    pub target: Option<Position>,
    /// Card causing the effect.
    pub source: CardId,
    /// Player who activated the effect.
    pub activator: UserId,
    /// Phase when the effect was triggered.
    pub phase_triggered: GamePhase,
}

impl EffectContext {
    /// Create a context without a target.
    #[must_use]
    pub fn new(trigger: Position, source: CardId, activator: UserId, phase: GamePhase) -> Self {
        Self {
            trigger,
            target: None,
            source,
            activator,
            phase_triggered: phase,
        }
    }

    /// Set the target position (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: Position) -> Self {
        self.target = Some(target);
        self
    }
}

/// The append-only effect audit stack.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectsState {
    pub effects_stack: Vector<EffectContext>,
}

/// A state-invariant violation found by [`GameStateData::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{seat} hand holds {len} cards, limit is {limit}")]
    HandOverLimit { seat: Seat, len: usize, limit: usize },

    #[error("{seat} deck holds {len} cards, limit is {limit}")]
    DeckOverLimit { seat: Seat, len: usize, limit: usize },

    #[error("round {round} exceeds the round limit {limit}")]
    RoundOverLimit { round: u32, limit: u32 },
}

/// The full serializable battle state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameStateData {
    pub players: [PlayerState; 2],
    pub round_number: u32,
    pub phase: GamePhase,
    pub board: BoardState,
    pub effects: EffectsState,
    pub completion: CompletionState,
    pub rules: Rules,
}

impl GameStateData {
    /// A player's state by seat.
    #[must_use]
    pub fn player(&self, seat: Seat) -> &PlayerState {
        &self.players[seat.index()]
    }

    /// Mutable access to a player's state by seat.
    pub fn player_mut(&mut self, seat: Seat) -> &mut PlayerState {
        &mut self.players[seat.index()]
    }

    /// The seat a user occupies, if they are in this game.
    #[must_use]
    pub fn seat_of(&self, user: UserId) -> Option<Seat> {
        Seat::both().into_iter().find(|s| self.player(*s).user == user)
    }

    /// Record a triggered effect on the audit stack.
    pub fn push_effect(&mut self, context: EffectContext) {
        self.effects.effects_stack.push_back(context);
    }

    /// Read-only JSON snapshot for condition evaluation.
    pub fn snapshot(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Check the structural invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for seat in Seat::both() {
            let player = self.player(seat);
            if player.hand.len() > self.rules.hand_limit {
                return Err(ValidationError::HandOverLimit {
                    seat,
                    len: player.hand.len(),
                    limit: self.rules.hand_limit,
                });
            }
            if player.deck.len() > self.rules.deck_limit {
                return Err(ValidationError::DeckOverLimit {
                    seat,
                    len: player.deck.len(),
                    limit: self.rules.deck_limit,
                });
            }
        }
        if self.round_number > self.rules.round_limit {
            return Err(ValidationError::RoundOverLimit {
                round: self.round_number,
                limit: self.rules.round_limit,
            });
        }
        Ok(())
    }
}

/// The aggregate root: identity plus battle state plus timestamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub id: GameStateId,
    pub data: GameStateData,
    pub metadata: Metadata,
}

impl GameState {
    /// Create a match-start state from two freshly dealt players.
    ///
    /// Seeds the board row-major, alternating seats: each of the 16 cells
    /// takes the next undealt card from the owning player's deck, face
    /// down. Each player contributes 8 cards; with 52-card decks and a
    /// 3-card starting hand, 41 cards remain in each deck.
    #[must_use]
    pub fn new(mut players: [PlayerState; 2]) -> Self {
        let mut board = BoardState::new();
        let mut turn = Seat::P1;

        for position in Position::all() {
            let player = &mut players[turn.index()];
            if !player.deck.is_empty() {
                let card = player.deck.remove(0);
                *board.space_mut(position) = BoardSpace {
                    card: Some(card),
                    revealed: false,
                    owner: Some(player.user),
                };
            }
            turn = turn.opponent();
        }

        Self {
            id: GameStateId::generate(),
            data: GameStateData {
                players,
                round_number: 1,
                phase: GamePhase::Setup,
                board,
                effects: EffectsState::default(),
                completion: CompletionState::default(),
                rules: Rules::default(),
            },
            metadata: Metadata::now(),
        }
    }
}

/// One entry in the append-only version log: a full snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameStateVersion {
    pub id: GameStateVersionId,
    pub state: GameState,
    pub metadata: Metadata,
}

impl GameStateVersion {
    /// Snapshot a state into a new version entry.
    #[must_use]
    pub fn new(state: &GameState) -> Self {
        Self {
            id: GameStateVersionId::generate(),
            state: state.clone(),
            metadata: Metadata::now(),
        }
    }
}
