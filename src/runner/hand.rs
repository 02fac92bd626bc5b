//! Bounded-collection operations over a player's hand.

use crate::cards::shuffle_cards;
use crate::core::CardId;
use crate::state::Hand;

/// Mutating view over one player's hand, bounded by the rules' hand limit.
#[derive(Debug)]
pub struct HandRunner<'a> {
    cards: &'a mut Hand,
    limit: usize,
}

impl<'a> HandRunner<'a> {
    #[must_use]
    pub fn new(cards: &'a mut Hand, limit: usize) -> Self {
        Self { cards, limit }
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True when no cards are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// True when the hand holds the card.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    /// True when another card would exceed the limit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.limit
    }

    /// Add a card. A full hand silently drops the card; callers observe
    /// the length delta or check [`HandRunner::is_full`] first.
    pub fn add_card(&mut self, card: CardId) {
        if self.is_full() {
            return;
        }
        self.cards.push(card);
    }

    /// Remove the first matching card. Absent cards are a no-op.
    pub fn remove_card(&mut self, card: CardId) {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
        }
    }

    /// Shuffle the hand with a fresh random seed.
    pub fn shuffle(&mut self) {
        *self.cards = shuffle_cards(self.cards).into_iter().collect();
    }
}
