//! Player-level turn actions.
//!
//! Composes the deck, hand, and board runners into the actions a player
//! takes during a round, each gated by its per-turn flag and routed
//! through the effect-dispatch gate.

use crate::cards::CardEffectType;
use crate::core::{CardId, Position, UserId};
use crate::state::{EffectContext, GameStateData, Seat};

use super::board::BoardRunner;
use super::deck::DeckRunner;
use super::gate::{ApplyOutcome, EffectGate, EffectRequest, GateDecision, RejectReason, RunnerError};
use super::hand::HandRunner;

/// Mutating view over one seat's player state within a game.
pub struct PlayerRunner<'a> {
    state: &'a mut GameStateData,
    seat: Seat,
    gate: EffectGate<'a>,
}

impl<'a> PlayerRunner<'a> {
    #[must_use]
    pub fn new(state: &'a mut GameStateData, seat: Seat, gate: EffectGate<'a>) -> Self {
        Self { state, seat, gate }
    }

    /// The acting player's user ID.
    #[must_use]
    pub fn user(&self) -> UserId {
        self.state.player(self.seat).user
    }

    /// The seat this runner acts for.
    #[must_use]
    pub fn seat(&self) -> Seat {
        self.seat
    }

    fn board(&mut self) -> BoardRunner<'_> {
        BoardRunner::new(self.state, self.gate)
    }

    fn record(&mut self, decision: &GateDecision, trigger: Position, source: CardId) {
        let phase = self.state.phase;
        let activator = self.user();
        for _ in &decision.fired {
            self.state
                .push_effect(EffectContext::new(trigger, source, activator, phase));
        }
    }

    /// Draw the top deck card into the hand. At most once per turn.
    pub fn draw_card(&mut self) -> Result<ApplyOutcome, RunnerError> {
        let player = self.state.player(self.seat);
        let Some(top) = player.deck.last().copied() else {
            return Ok(ApplyOutcome::Rejected(RejectReason::DeckEmpty));
        };
        if player.has_drawn_this_turn {
            return Ok(ApplyOutcome::Rejected(RejectReason::AlreadyDrawnThisTurn));
        }
        if player.hand.len() >= self.state.rules.hand_limit {
            return Ok(ApplyOutcome::Rejected(RejectReason::HandFull));
        }

        let decision = self
            .gate
            .check(&EffectRequest::new(top, CardEffectType::Draw), self.state)?;
        if !decision.allowed {
            return Ok(ApplyOutcome::Rejected(RejectReason::ConditionFailed));
        }

        let limit = self.state.rules.hand_limit;
        let player = self.state.player_mut(self.seat);
        if let Some(card) = DeckRunner::new(&mut player.deck).pop() {
            HandRunner::new(&mut player.hand, limit).add_card(card);
            player.last_drawn_card = Some(card);
            player.has_drawn_this_turn = true;
        }
        Ok(ApplyOutcome::Applied)
    }

    /// Move a hand card onto an owned empty board cell. At most once per
    /// turn; the hand is only touched once the placement is accepted.
    pub fn swap_card(
        &mut self,
        card: CardId,
        position: Position,
    ) -> Result<ApplyOutcome, RunnerError> {
        let player = self.state.player(self.seat);
        if player.has_swapped_this_turn {
            return Ok(ApplyOutcome::Rejected(RejectReason::AlreadySwappedThisTurn));
        }
        if !player.hand.contains(&card) {
            return Ok(ApplyOutcome::Rejected(RejectReason::CardNotInHand));
        }

        let decision = self
            .gate
            .check(&EffectRequest::new(card, CardEffectType::Swap), self.state)?;
        if !decision.allowed {
            return Ok(ApplyOutcome::Rejected(RejectReason::ConditionFailed));
        }

        let user = self.user();
        let outcome = self.board().place_card(card, user, position)?;
        if !outcome.is_applied() {
            return Ok(outcome);
        }

        let limit = self.state.rules.hand_limit;
        let player = self.state.player_mut(self.seat);
        HandRunner::new(&mut player.hand, limit).remove_card(card);
        player.last_placed_card = Some(card);
        player.has_swapped_this_turn = true;
        self.record(&decision, position, card);
        Ok(ApplyOutcome::Applied)
    }

    /// Move a hand card to the discard pile. At most once per turn.
    pub fn discard_card(&mut self, card: CardId) -> Result<ApplyOutcome, RunnerError> {
        let player = self.state.player(self.seat);
        if player.has_discarded_this_turn {
            return Ok(ApplyOutcome::Rejected(RejectReason::AlreadyDiscardedThisTurn));
        }
        if !player.hand.contains(&card) {
            return Ok(ApplyOutcome::Rejected(RejectReason::CardNotInHand));
        }

        let decision = self
            .gate
            .check(&EffectRequest::new(card, CardEffectType::Discard), self.state)?;
        if !decision.allowed {
            return Ok(ApplyOutcome::Rejected(RejectReason::ConditionFailed));
        }

        let limit = self.state.rules.hand_limit;
        let player = self.state.player_mut(self.seat);
        HandRunner::new(&mut player.hand, limit).remove_card(card);
        player.discarded_cards.push(card);
        player.last_discarded_card = Some(card);
        player.has_discarded_this_turn = true;
        Ok(ApplyOutcome::Applied)
    }

    /// Reveal an owned board cell and remember having seen it.
    pub fn reveal_card(&mut self, position: Position) -> Result<ApplyOutcome, RunnerError> {
        let user = self.user();
        let outcome = self.board().reveal_card(user, position)?;
        if outcome.is_applied() {
            self.state.player_mut(self.seat).revealed_cards.insert(position);
        }
        Ok(outcome)
    }

    /// Clear an occupied board cell into the hand.
    pub fn take_card_from_board(&mut self, position: Position) -> Result<ApplyOutcome, RunnerError> {
        let Some(card) = self.state.board.space(position).card else {
            return Ok(ApplyOutcome::Rejected(RejectReason::EmptySpace));
        };
        if self.state.player(self.seat).hand.len() >= self.state.rules.hand_limit {
            return Ok(ApplyOutcome::Rejected(RejectReason::HandFull));
        }

        let decision = self
            .gate
            .check(&EffectRequest::new(card, CardEffectType::Draw), self.state)?;
        if !decision.allowed {
            return Ok(ApplyOutcome::Rejected(RejectReason::ConditionFailed));
        }

        let outcome = self.board().clear_space(position)?;
        if !outcome.is_applied() {
            return Ok(outcome);
        }

        let limit = self.state.rules.hand_limit;
        let player = self.state.player_mut(self.seat);
        HandRunner::new(&mut player.hand, limit).add_card(card);
        player.empty_spaces.insert(position);
        Ok(ApplyOutcome::Applied)
    }

    /// Move a discarded card back into the hand.
    pub fn return_discard_to_hand(&mut self, card: CardId) -> ApplyOutcome {
        let limit = self.state.rules.hand_limit;
        let player = self.state.player_mut(self.seat);
        let Some(index) = player.discarded_cards.iter().position(|&c| c == card) else {
            return ApplyOutcome::Rejected(RejectReason::CardNotInDiscard);
        };
        if player.hand.len() >= limit {
            return ApplyOutcome::Rejected(RejectReason::HandFull);
        }
        player.discarded_cards.remove(index);
        HandRunner::new(&mut player.hand, limit).add_card(card);
        ApplyOutcome::Applied
    }

    /// Move a discarded card back on top of the deck.
    pub fn return_discard_to_deck(&mut self, card: CardId) -> ApplyOutcome {
        let player = self.state.player_mut(self.seat);
        let Some(index) = player.discarded_cards.iter().position(|&c| c == card) else {
            return ApplyOutcome::Rejected(RejectReason::CardNotInDiscard);
        };
        player.discarded_cards.remove(index);
        DeckRunner::new(&mut player.deck).push(card);
        ApplyOutcome::Applied
    }

    /// Move the whole discard pile on top of the deck.
    pub fn return_discards_to_deck(&mut self) {
        let player = self.state.player_mut(self.seat);
        let discarded = std::mem::take(&mut player.discarded_cards);
        DeckRunner::new(&mut player.deck).push_many(discarded);
    }

    /// Move the whole hand to the discard pile.
    pub fn discard_hand(&mut self) {
        let player = self.state.player_mut(self.seat);
        let hand = std::mem::take(&mut player.hand);
        player.discarded_cards.extend(hand);
    }

    /// Unconditional point gain.
    pub fn add_points(&mut self, points: i64) {
        self.state.player_mut(self.seat).points += points;
    }

    /// Unconditional point loss; no floor is enforced.
    pub fn subtract_points(&mut self, points: i64) {
        self.state.player_mut(self.seat).points -= points;
    }

    /// Shuffle the hand in place.
    pub fn shuffle_hand(&mut self) {
        let limit = self.state.rules.hand_limit;
        let player = self.state.player_mut(self.seat);
        HandRunner::new(&mut player.hand, limit).shuffle();
    }

    /// Shuffle the deck in place.
    pub fn shuffle_deck(&mut self) {
        let player = self.state.player_mut(self.seat);
        DeckRunner::new(&mut player.deck).shuffle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardRegistry, Deck};
    use crate::core::DeckId;
    use crate::state::{GamePhase, GameState, PlayerState, Rules};

    fn test_state() -> GameStateData {
        let rules = Rules::default();
        let deck = |user: u64| {
            Deck::new(
                DeckId::new(user),
                UserId::new(user),
                (1..=52).map(|i| CardId::new(user * 100 + i)).collect(),
                "t",
            )
        };
        let mut data = GameState::new([
            PlayerState::new(UserId::new(1), &deck(1), &rules),
            PlayerState::new(UserId::new(2), &deck(2), &rules),
        ])
        .data;
        data.phase = GamePhase::CardAction;
        data
    }

    fn pos(x: usize, y: usize) -> Position {
        Position::new(x, y).unwrap()
    }

    #[test]
    fn test_draw_card_once_per_turn() {
        let mut state = test_state();
        let registry = CardRegistry::new();
        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));

        let first = player.draw_card().unwrap();
        assert_eq!(first, ApplyOutcome::Applied);

        let second = player.draw_card().unwrap();
        assert_eq!(
            second,
            ApplyOutcome::Rejected(RejectReason::AlreadyDrawnThisTurn)
        );

        let player = state.player(Seat::P1);
        assert_eq!(player.hand.len(), 4);
        assert_eq!(player.deck.len(), 40);
        assert_eq!(player.last_drawn_card, player.hand.last().copied());
        assert!(player.has_drawn_this_turn);
    }

    #[test]
    fn test_draw_rejected_at_hand_limit() {
        let mut state = test_state();
        let registry = CardRegistry::new();
        for i in 0..2 {
            state.player_mut(Seat::P1).hand.push(CardId::new(900 + i));
        }
        assert_eq!(state.player(Seat::P1).hand.len(), 5);

        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));
        let outcome = player.draw_card().unwrap();

        assert_eq!(outcome, ApplyOutcome::Rejected(RejectReason::HandFull));
        assert_eq!(state.player(Seat::P1).deck.len(), 41);
    }

    #[test]
    fn test_draw_rejected_on_empty_deck() {
        let mut state = test_state();
        let registry = CardRegistry::new();
        state.player_mut(Seat::P1).deck.clear();

        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));
        let outcome = player.draw_card().unwrap();

        assert_eq!(outcome, ApplyOutcome::Rejected(RejectReason::DeckEmpty));
    }

    #[test]
    fn test_swap_places_hand_card() {
        let mut state = test_state();
        let registry = CardRegistry::new();
        let position = pos(0, 0);
        state.board.space_mut(position).card = None;
        let card = state.player(Seat::P1).hand[0];

        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));
        let outcome = player.swap_card(card, position).unwrap();

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(state.board.space(position).card, Some(card));
        let player = state.player(Seat::P1);
        assert!(!player.hand.contains(&card));
        assert_eq!(player.last_placed_card, Some(card));
        assert!(player.has_swapped_this_turn);
    }

    #[test]
    fn test_swap_rejection_leaves_hand_intact() {
        let mut state = test_state();
        let registry = CardRegistry::new();
        // (0,0) is still occupied.
        let card = state.player(Seat::P1).hand[0];

        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));
        let outcome = player.swap_card(card, pos(0, 0)).unwrap();

        assert_eq!(outcome, ApplyOutcome::Rejected(RejectReason::SpaceOccupied));
        let player = state.player(Seat::P1);
        assert!(player.hand.contains(&card));
        assert!(!player.has_swapped_this_turn);
    }

    #[test]
    fn test_swap_unknown_card_rejected() {
        let mut state = test_state();
        let registry = CardRegistry::new();
        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));

        let outcome = player.swap_card(CardId::new(999), pos(0, 0)).unwrap();
        assert_eq!(outcome, ApplyOutcome::Rejected(RejectReason::CardNotInHand));
    }

    #[test]
    fn test_discard_card() {
        let mut state = test_state();
        let registry = CardRegistry::new();
        let card = state.player(Seat::P1).hand[0];
        let next = state.player(Seat::P1).hand[1];

        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));
        let outcome = player.discard_card(card).unwrap();
        assert_eq!(outcome, ApplyOutcome::Applied);

        // Second discard in the same turn is rejected.
        let repeat = player.discard_card(next).unwrap();
        assert_eq!(
            repeat,
            ApplyOutcome::Rejected(RejectReason::AlreadyDiscardedThisTurn)
        );

        let player = state.player(Seat::P1);
        assert_eq!(player.discarded_cards, vec![card]);
        assert_eq!(player.last_discarded_card, Some(card));
        assert_eq!(player.hand.len(), 2);
    }

    #[test]
    fn test_reveal_tracks_seen_positions() {
        let mut state = test_state();
        let registry = CardRegistry::new();
        let position = pos(0, 0); // owned by player 1

        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));
        let outcome = player.reveal_card(position).unwrap();

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert!(state.player(Seat::P1).revealed_cards.contains(&position));

        // A foreign cell is rejected and not tracked.
        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));
        let outcome = player.reveal_card(pos(1, 0)).unwrap();
        assert_eq!(outcome, ApplyOutcome::Rejected(RejectReason::NotOwner));
        assert!(!state.player(Seat::P1).revealed_cards.contains(&pos(1, 0)));
    }

    #[test]
    fn test_points_can_go_negative() {
        let mut state = test_state();
        let registry = CardRegistry::new();
        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));

        player.add_points(2);
        player.subtract_points(5);

        assert_eq!(state.player(Seat::P1).points, -3);
    }

    #[test]
    fn test_take_card_from_board() {
        let mut state = test_state();
        let registry = CardRegistry::new();
        let position = pos(0, 0);
        let card = state.board.space(position).card.unwrap();

        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));
        let outcome = player.take_card_from_board(position).unwrap();

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert!(state.board.is_empty_space(position));
        assert!(state.player(Seat::P1).hand.contains(&card));
        assert!(state.player(Seat::P1).empty_spaces.contains(&position));
    }

    #[test]
    fn test_discard_round_trip() {
        let mut state = test_state();
        let registry = CardRegistry::new();
        let card = state.player(Seat::P1).hand[0];

        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));
        player.discard_card(card).unwrap();
        assert_eq!(player.return_discard_to_hand(card), ApplyOutcome::Applied);

        assert!(state.player(Seat::P1).hand.contains(&card));
        assert!(state.player(Seat::P1).discarded_cards.is_empty());

        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));
        assert_eq!(
            player.return_discard_to_hand(card),
            ApplyOutcome::Rejected(RejectReason::CardNotInDiscard)
        );
    }

    #[test]
    fn test_discard_hand_and_recycle() {
        let mut state = test_state();
        let registry = CardRegistry::new();
        let hand_before: Vec<_> = state.player(Seat::P1).hand.to_vec();
        let deck_before = state.player(Seat::P1).deck.len();

        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));
        player.discard_hand();
        assert!(state.player(Seat::P1).hand.is_empty());
        assert_eq!(state.player(Seat::P1).discarded_cards, hand_before);

        let mut player = PlayerRunner::new(&mut state, Seat::P1, EffectGate::new(&registry));
        player.return_discards_to_deck();
        assert!(state.player(Seat::P1).discarded_cards.is_empty());
        assert_eq!(state.player(Seat::P1).deck.len(), deck_before + hand_before.len());
    }
}
