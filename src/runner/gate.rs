//! The effect-dispatch pipeline.
//!
//! Every rule-constrained mutation builds an [`EffectRequest`], asks the
//! [`EffectGate`] whether the triggering card's guards hold against a
//! read-only snapshot of the game state, and applies the mutation only on
//! an allowing [`GateDecision`]. Cards with no effects for the trigger
//! pass unconditionally; evaluation failures always propagate.

use crate::cards::{CardEffect, CardEffectType, CardRegistry};
use crate::core::CardId;
use crate::expr::{EvalError, Evaluator};
use crate::state::GameStateData;

/// Why a requested mutation did not happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The triggering card's guard conditions did not hold.
    ConditionFailed,
    /// The target cell already holds a card.
    SpaceOccupied,
    /// The target cell does not belong to the acting player.
    NotOwner,
    /// The target cell holds no card.
    EmptySpace,
    /// The player already drew this turn.
    AlreadyDrawnThisTurn,
    /// The player already swapped this turn.
    AlreadySwappedThisTurn,
    /// The player already discarded this turn.
    AlreadyDiscardedThisTurn,
    /// The hand is at its limit.
    HandFull,
    /// The deck has no cards left.
    DeckEmpty,
    /// The named card is not in the player's hand.
    CardNotInHand,
    /// The named card is not in the player's discard pile.
    CardNotInDiscard,
}

/// First-class result of a rule-constrained mutation: callers can always
/// distinguish a real mutation from a declined one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum ApplyOutcome {
    Applied,
    Rejected(RejectReason),
}

impl ApplyOutcome {
    /// True when the mutation actually ran.
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// A mutation attempt attributed to a card and trigger point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectRequest {
    pub card: CardId,
    pub effect_type: CardEffectType,
}

impl EffectRequest {
    #[must_use]
    pub fn new(card: CardId, effect_type: CardEffectType) -> Self {
        Self { card, effect_type }
    }
}

/// The gate's verdict for one request.
#[derive(Clone, Debug)]
pub struct GateDecision {
    /// Whether the intended mutation may run.
    pub allowed: bool,
    /// The effects whose guards held, in declaration order.
    pub fired: Vec<CardEffect>,
}

impl GateDecision {
    fn pass() -> Self {
        Self {
            allowed: true,
            fired: Vec::new(),
        }
    }
}

/// An error raised while dispatching an effect request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RunnerError {
    #[error("condition evaluation failed: {0}")]
    Eval(#[from] EvalError),

    #[error("failed to snapshot game state: {0}")]
    Snapshot(String),
}

/// Consults the condition evaluator before any gated mutation runs.
#[derive(Clone, Copy, Debug)]
pub struct EffectGate<'a> {
    registry: &'a CardRegistry,
}

impl<'a> EffectGate<'a> {
    #[must_use]
    pub fn new(registry: &'a CardRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate the request's guards against a snapshot of `state`.
    ///
    /// A card declaring no effects for the trigger passes. A card with
    /// effects is allowed through only when at least one guard holds;
    /// the passing effects are returned for audit recording and
    /// application.
    pub fn check(
        &self,
        request: &EffectRequest,
        state: &GameStateData,
    ) -> Result<GateDecision, RunnerError> {
        let effects = self.registry.effects_for(request.card, request.effect_type);
        if effects.is_empty() {
            return Ok(GateDecision::pass());
        }

        let snapshot = state
            .snapshot()
            .map_err(|e| RunnerError::Snapshot(e.to_string()))?;

        let mut fired = Vec::new();
        for effect in effects {
            if Evaluator::evaluate(&effect.condition, &snapshot)? {
                fired.push(effect.clone());
            }
        }

        Ok(GateDecision {
            allowed: !fired.is_empty(),
            fired,
        })
    }
}
