//! Gated mutations of the 4x4 board.
//!
//! Ownership and occupancy are checked before the effect gate is
//! consulted, so rejections carry a precise reason. Fired effects are
//! recorded on the audit stack at the mutated position.

use crate::cards::CardEffectType;
use crate::core::{CardId, Position, UserId};
use crate::state::{BoardSpace, EffectContext, GameStateData};

use super::gate::{ApplyOutcome, EffectGate, EffectRequest, GateDecision, RejectReason, RunnerError};

/// Mutating view over the board within a game state.
pub struct BoardRunner<'a> {
    state: &'a mut GameStateData,
    gate: EffectGate<'a>,
}

impl<'a> BoardRunner<'a> {
    #[must_use]
    pub fn new(state: &'a mut GameStateData, gate: EffectGate<'a>) -> Self {
        Self { state, gate }
    }

    /// True iff the cell holds no card.
    #[must_use]
    pub fn is_empty_space(&self, position: Position) -> bool {
        self.state.board.is_empty_space(position)
    }

    /// Place a card on an empty cell owned by `player`.
    pub fn place_card(
        &mut self,
        card: CardId,
        player: UserId,
        position: Position,
    ) -> Result<ApplyOutcome, RunnerError> {
        let space = *self.state.board.space(position);
        if !space.is_empty() {
            return Ok(ApplyOutcome::Rejected(RejectReason::SpaceOccupied));
        }
        if space.owner != Some(player) {
            return Ok(ApplyOutcome::Rejected(RejectReason::NotOwner));
        }

        let decision = self
            .gate
            .check(&EffectRequest::new(card, CardEffectType::Place), self.state)?;
        if !decision.allowed {
            return Ok(ApplyOutcome::Rejected(RejectReason::ConditionFailed));
        }

        self.state.board.space_mut(position).card = Some(card);
        self.record(&decision, position, card, player);
        Ok(ApplyOutcome::Applied)
    }

    /// Turn the card at `position` face-up, if `player` owns the cell.
    pub fn reveal_card(
        &mut self,
        player: UserId,
        position: Position,
    ) -> Result<ApplyOutcome, RunnerError> {
        let space = *self.state.board.space(position);
        if space.owner != Some(player) {
            return Ok(ApplyOutcome::Rejected(RejectReason::NotOwner));
        }
        let Some(card) = space.card else {
            return Ok(ApplyOutcome::Rejected(RejectReason::EmptySpace));
        };

        let decision = self
            .gate
            .check(&EffectRequest::new(card, CardEffectType::Reveal), self.state)?;
        if !decision.allowed {
            return Ok(ApplyOutcome::Rejected(RejectReason::ConditionFailed));
        }

        self.state.board.space_mut(position).revealed = true;
        self.record(&decision, position, card, player);
        Ok(ApplyOutcome::Applied)
    }

    /// Record the position as cleared and reset the cell to empty.
    ///
    /// Occupied cells dispatch under the reveal trigger before clearing;
    /// clearing an already-empty cell only records the position.
    pub fn clear_space(&mut self, position: Position) -> Result<ApplyOutcome, RunnerError> {
        let space = *self.state.board.space(position);
        if let Some(card) = space.card {
            let decision = self
                .gate
                .check(&EffectRequest::new(card, CardEffectType::Reveal), self.state)?;
            if !decision.allowed {
                return Ok(ApplyOutcome::Rejected(RejectReason::ConditionFailed));
            }
            if let Some(owner) = space.owner {
                self.record(&decision, position, card, owner);
            }
        }

        self.state.board.cleared_spaces.insert(position);
        *self.state.board.space_mut(position) = BoardSpace::default();
        Ok(ApplyOutcome::Applied)
    }

    fn record(&mut self, decision: &GateDecision, trigger: Position, source: CardId, activator: UserId) {
        let phase = self.state.phase;
        for _ in &decision.fired {
            self.state
                .push_effect(EffectContext::new(trigger, source, activator, phase));
        }
    }
}
