//! The phase state machine.
//!
//! Setup -> CardAction -> Reveal -> War -> Cleanup, looping back to
//! CardAction until the round limit passes or the board is fully
//! cleared. Each transition does the entered phase's work: CardAction
//! entry resets per-turn state, War resolves the revealed cards, Cleanup
//! clears them and advances the round.

use std::cmp::Ordering;

use tracing::debug;

use crate::cards::{Card, CardEffect, CardEffectType, CardRegistry, EffectAttributes};
use crate::core::{CardId, Position};
use crate::runner::{ApplyOutcome, BoardRunner, EffectGate, EffectRequest, RejectReason};
use crate::state::{CompletionState, EffectContext, GamePhase, GameStateData, Seat};

use super::ServiceError;

/// One seat's contribution to a War: the revealed card and its value
/// after on-war effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WarCard {
    pub position: Position,
    pub card: CardId,
    pub base_value: i64,
    pub effective_value: i64,
}

/// The result of a resolved War.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WarOutcome {
    /// Per-seat revealed cards; a seat without a usable selection sits
    /// the comparison out.
    pub cards: [Option<WarCard>; 2],
    /// The seat that scored the point, if any.
    pub winner: Option<Seat>,
}

/// Drives one game's state through the phase cycle.
pub struct PhaseMachine<'a> {
    state: &'a mut GameStateData,
    registry: &'a CardRegistry,
    gate: EffectGate<'a>,
}

impl<'a> PhaseMachine<'a> {
    #[must_use]
    pub fn new(state: &'a mut GameStateData, registry: &'a CardRegistry) -> Self {
        Self {
            state,
            registry,
            gate: EffectGate::new(registry),
        }
    }

    /// Move the machine one phase forward, doing the entered phase's
    /// work. Returns the phase the game is now in.
    pub fn advance(&mut self) -> Result<GamePhase, ServiceError> {
        if self.state.completion.is_complete {
            return Err(ServiceError::GameComplete);
        }

        match self.state.phase {
            GamePhase::Setup | GamePhase::Cleanup => self.enter_card_action(),
            GamePhase::CardAction => self.state.phase = GamePhase::Reveal,
            GamePhase::Reveal => {
                for seat in Seat::both() {
                    self.auto_select(seat);
                }
                self.state.phase = GamePhase::War;
                let outcome = self.resolve_war()?;
                debug!(winner = ?outcome.winner, "war resolved");
            }
            GamePhase::War => {
                self.state.phase = GamePhase::Cleanup;
                self.run_cleanup()?;
            }
        }
        Ok(self.state.phase)
    }

    /// Enter CardAction: the only place per-turn flags are cleared.
    fn enter_card_action(&mut self) {
        for seat in Seat::both() {
            self.state.player_mut(seat).begin_turn();
        }
        self.state.phase = GamePhase::CardAction;
    }

    /// Record a seat's War selection. Only valid during Reveal, and only
    /// for an occupied cell the seat owns.
    pub fn select_card(
        &mut self,
        seat: Seat,
        position: Position,
    ) -> Result<ApplyOutcome, ServiceError> {
        self.expect_phase(GamePhase::Reveal)?;

        let space = self.state.board.space(position);
        if space.owner != Some(self.state.player(seat).user) {
            return Ok(ApplyOutcome::Rejected(RejectReason::NotOwner));
        }
        if space.is_empty() {
            return Ok(ApplyOutcome::Rejected(RejectReason::EmptySpace));
        }

        self.state.player_mut(seat).selected_card = Some(position);
        Ok(ApplyOutcome::Applied)
    }

    /// Fill in a missing selection from the seat's last placed card,
    /// then its last drawn card, whichever still sits on an owned cell.
    ///
    /// The round timer itself is the caller's concern; this is the
    /// fallback it applies when the timer expires without a selection.
    pub fn auto_select(&mut self, seat: Seat) -> Option<Position> {
        if let Some(selected) = self.state.player(seat).selected_card {
            return Some(selected);
        }

        let player = self.state.player(seat);
        let user = player.user;
        let candidates = [player.last_placed_card, player.last_drawn_card];
        for card in candidates.into_iter().flatten() {
            if let Some(position) = self.state.board.position_of(card) {
                if self.state.board.space(position).owner == Some(user) {
                    self.state.player_mut(seat).selected_card = Some(position);
                    return Some(position);
                }
            }
        }
        None
    }

    /// Reveal both selections and fight the War.
    ///
    /// A selection whose reveal is declined by its own guard stays face
    /// down and sits the comparison out; a lone revealed card wins. The
    /// higher effective value scores one point. Fired on-war effects
    /// adjust values before the comparison and points/cards after it,
    /// and each one is recorded on the audit stack.
    pub fn resolve_war(&mut self) -> Result<WarOutcome, ServiceError> {
        let mut cards: [Option<WarCard>; 2] = [None, None];
        for seat in Seat::both() {
            let Some(position) = self.state.player(seat).selected_card else {
                continue;
            };
            let user = self.state.player(seat).user;
            let revealed =
                BoardRunner::new(self.state, self.gate).reveal_card(user, position)?;
            if !revealed.is_applied() {
                continue;
            }
            self.state.player_mut(seat).revealed_cards.insert(position);

            let Some(card) = self.state.board.space(position).card else {
                continue;
            };
            // Cards without a registered definition fight at value 0.
            let base = self.registry.get(card).map_or(0, Card::war_value);
            cards[seat.index()] = Some(WarCard {
                position,
                card,
                base_value: base,
                effective_value: base,
            });
        }

        let mut fired: [Vec<CardEffect>; 2] = [Vec::new(), Vec::new()];
        for seat in Seat::both() {
            let Some(war_card) = cards[seat.index()] else {
                continue;
            };
            let decision = self.gate.check(
                &EffectRequest::new(war_card.card, CardEffectType::War),
                self.state,
            )?;

            let target = cards[seat.opponent().index()].map(|c| c.position);
            let activator = self.state.player(seat).user;
            for _ in &decision.fired {
                let mut context =
                    EffectContext::new(war_card.position, war_card.card, activator, GamePhase::War);
                if let Some(target) = target {
                    context = context.with_target(target);
                }
                self.state.push_effect(context);
            }
            fired[seat.index()] = decision.fired;
        }

        // Value deltas shift the comparison before anything else lands.
        for seat in Seat::both() {
            for effect in &fired[seat.index()] {
                for attrs in &effect.gain_value {
                    if let Some(card) = cards[target_seat(seat, attrs).index()].as_mut() {
                        card.effective_value += attrs.amount.unwrap_or(0);
                    }
                }
                for attrs in &effect.lose_value {
                    if let Some(card) = cards[target_seat(seat, attrs).index()].as_mut() {
                        card.effective_value -= attrs.amount.unwrap_or(0);
                    }
                }
            }
        }

        let winner = match (&cards[0], &cards[1]) {
            (Some(p1), Some(p2)) => match p1.effective_value.cmp(&p2.effective_value) {
                Ordering::Greater => Some(Seat::P1),
                Ordering::Less => Some(Seat::P2),
                Ordering::Equal => None,
            },
            (Some(_), None) => Some(Seat::P1),
            (None, Some(_)) => Some(Seat::P2),
            (None, None) => None,
        };
        if let Some(winner) = winner {
            self.state.player_mut(winner).points += 1;
        }

        for seat in Seat::both() {
            let effects = std::mem::take(&mut fired[seat.index()]);
            for effect in &effects {
                for attrs in &effect.gain_points {
                    let target = target_seat(seat, attrs);
                    self.state.player_mut(target).points += attrs.amount.unwrap_or(0);
                }
                for attrs in &effect.lose_points {
                    let target = target_seat(seat, attrs);
                    self.state.player_mut(target).points -= attrs.amount.unwrap_or(0);
                }
                for attrs in &effect.draw {
                    self.forced_draw(target_seat(seat, attrs), attrs.amount.unwrap_or(1));
                }
                for attrs in &effect.discard {
                    self.forced_discard(target_seat(seat, attrs), attrs.amount.unwrap_or(1));
                }
            }
        }

        Ok(WarOutcome { cards, winner })
    }

    /// Effect-driven draw: not a turn action, so the once-per-turn flag
    /// stays untouched. Stops at the hand limit or an empty deck.
    fn forced_draw(&mut self, seat: Seat, amount: i64) {
        let limit = self.state.rules.hand_limit;
        let player = self.state.player_mut(seat);
        for _ in 0..amount.max(0) {
            if player.hand.len() >= limit {
                break;
            }
            let Some(card) = player.deck.pop() else {
                break;
            };
            player.hand.push(card);
            player.last_drawn_card = Some(card);
        }
    }

    /// Effect-driven discard, from the front of the hand.
    fn forced_discard(&mut self, seat: Seat, amount: i64) {
        let player = self.state.player_mut(seat);
        for _ in 0..amount.max(0) {
            if player.hand.is_empty() {
                break;
            }
            let card = player.hand.remove(0);
            player.discarded_cards.push(card);
            player.last_discarded_card = Some(card);
        }
    }

    /// Clear the revealed cells, reset selections, and either advance
    /// the round or complete the game.
    pub fn run_cleanup(&mut self) -> Result<(), ServiceError> {
        let revealed: Vec<Position> = self.state.board.revealed_positions().collect();
        for position in revealed {
            // A declined clear leaves the card face up for next round.
            let _ = BoardRunner::new(self.state, self.gate).clear_space(position)?;
        }
        for seat in Seat::both() {
            self.state.player_mut(seat).selected_card = None;
        }
        self.check_completion();
        Ok(())
    }

    /// The game ends when the final round's cleanup has run or every
    /// cell has been cleared; the strictly higher score wins, a tie
    /// crowns nobody. Otherwise the round counter moves on.
    fn check_completion(&mut self) {
        let finished = self.state.board.is_fully_cleared()
            || self.state.round_number >= self.state.rules.round_limit;
        if finished {
            let winner = match self.state.players[0].points.cmp(&self.state.players[1].points) {
                Ordering::Greater => Some(self.state.players[0].user),
                Ordering::Less => Some(self.state.players[1].user),
                Ordering::Equal => None,
            };
            self.state.completion = CompletionState {
                is_complete: true,
                winner,
            };
            debug!(round = self.state.round_number, ?winner, "game complete");
        } else {
            self.state.round_number += 1;
        }
    }

    fn expect_phase(&self, expected: GamePhase) -> Result<(), ServiceError> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(ServiceError::WrongPhase {
                expected,
                found: self.state.phase,
            })
        }
    }
}

/// The seat an effect attribute lands on.
fn target_seat(activator: Seat, attrs: &EffectAttributes) -> Seat {
    if attrs.for_opponent {
        activator.opponent()
    } else {
        activator
    }
}
