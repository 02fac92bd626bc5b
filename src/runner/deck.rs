//! Stack operations over a player's deck.
//!
//! The deck top is the end of the sequence. Pops on an empty deck return
//! `None` without mutating; `pop_many`/`peek_many` are all-or-nothing.
//! Pushes are unbounded: capacity limits apply to the hand, not the deck.

use crate::cards::shuffle_cards;
use crate::core::CardId;

/// Mutating view over one player's deck.
#[derive(Debug)]
pub struct DeckRunner<'a> {
    cards: &'a mut Vec<CardId>,
}

impl<'a> DeckRunner<'a> {
    #[must_use]
    pub fn new(cards: &'a mut Vec<CardId>) -> Self {
        Self { cards }
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True when no cards remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove and return the top card.
    pub fn pop(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    /// Remove and return the bottom card.
    pub fn pop_bottom(&mut self) -> Option<CardId> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    /// Remove and return the top `count` cards, bottom-most first.
    /// Returns `None` without mutating when fewer than `count` remain.
    pub fn pop_many(&mut self, count: usize) -> Option<Vec<CardId>> {
        if self.cards.len() < count {
            return None;
        }
        let split = self.cards.len() - count;
        Some(self.cards.split_off(split))
    }

    /// The top card, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    /// The bottom card, without removing it.
    #[must_use]
    pub fn peek_bottom(&self) -> Option<CardId> {
        self.cards.first().copied()
    }

    /// The top `count` cards, bottom-most first, without removing them.
    /// Returns `None` when fewer than `count` remain.
    #[must_use]
    pub fn peek_many(&self, count: usize) -> Option<&[CardId]> {
        if self.cards.len() < count {
            return None;
        }
        Some(&self.cards[self.cards.len() - count..])
    }

    /// Put a card on top.
    pub fn push(&mut self, card: CardId) {
        self.cards.push(card);
    }

    /// Put cards on top, in iteration order.
    pub fn push_many(&mut self, cards: impl IntoIterator<Item = CardId>) {
        self.cards.extend(cards);
    }

    /// Put a card on the bottom.
    pub fn push_bottom(&mut self, card: CardId) {
        self.cards.insert(0, card);
    }

    /// Shuffle the remaining cards with a fresh random seed.
    pub fn shuffle(&mut self) {
        *self.cards = shuffle_cards(self.cards);
    }
}
