//! # gridwar
//!
//! A two-player, turn-based card battle engine. The crate holds the
//! authoritative game state, applies player actions under strict rules,
//! resolves card effects through a declarative condition language, and
//! advances a match through a fixed phase cycle to completion.
//!
//! ## Design Principles
//!
//! 1. **Pure library**: No I/O. Persistence and user/deck lookup are
//!    traits the orchestrating service implements.
//!
//! 2. **Gated mutation**: Every rule-constrained mutation flows through
//!    the effect-dispatch gate, which evaluates the triggering card's
//!    guard conditions against a read-only snapshot before anything
//!    changes. Mutations report `Applied` or `Rejected(reason)`; there
//!    are no unconditional success booleans.
//!
//! 3. **One owner per game**: All mutation on one `GameState` is
//!    serialized by its owning context. Distinct games are independent.
//!
//! ## Modules
//!
//! - `core`: ID newtypes, validated board positions, record timestamps
//! - `expr`: the boolean condition language and its evaluator
//! - `cards`: card definitions, effects, stored decks, the registry
//! - `state`: the game-state data model and its invariants
//! - `runner`: deck/hand/board/player mutation contexts and the gate
//! - `service`: the game runner service and phase machine

pub mod cards;
pub mod core;
pub mod expr;
pub mod runner;
pub mod service;
pub mod state;

// Re-export commonly used types
pub use crate::core::{CardId, DeckId, GameStateId, GameStateVersionId, Metadata, Position, UserId};

pub use crate::expr::{
    ArrayOp, BoolOperator, BooleanExpression, ComparisonOp, Condition, EvalError, Evaluator, Term,
};

pub use crate::cards::{
    Card, CardEffect, CardEffectType, CardEffects, CardKind, CardRegistry, Deck, EffectAttributes,
};

pub use crate::state::{
    BoardSpace, BoardState, CompletionState, EffectContext, GamePhase, GameState, GameStateData,
    GameStateVersion, PlayerState, Rules, Seat,
};

pub use crate::runner::{
    ApplyOutcome, BoardRunner, DeckRunner, EffectGate, EffectRequest, GateDecision, HandRunner,
    PlayerRunner, RejectReason, RunnerError,
};

pub use crate::service::{
    GameRunnerContext, GameRunnerService, PhaseMachine, PlayerSlot, ServiceError,
    StartGameRequest, WarOutcome,
};
