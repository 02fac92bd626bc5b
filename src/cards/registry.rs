//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores all card definitions known to a game and
//! provides the effect-list lookups the dispatch gate relies on.

use rustc_hash::FxHashMap;

use super::card::Card;
use super::effect::{CardEffect, CardEffectType};
use crate::core::CardId;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use gridwar::cards::{Card, CardRegistry, Suite};
/// use gridwar::core::CardId;
///
/// let mut registry = CardRegistry::new();
/// registry.register(Card::number(CardId::new(1), Suite::Hearts, 7));
///
/// assert!(registry.contains(CardId::new(1)));
/// assert_eq!(registry.get(CardId::new(1)).unwrap().war_value(), 7);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Card>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: Card) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// The effects a card declares for a trigger point.
    ///
    /// Unknown cards and cards without effects for the trigger both
    /// yield the empty slice.
    #[must_use]
    pub fn effects_for(&self, id: CardId, effect_type: CardEffectType) -> &[CardEffect] {
        self.cards
            .get(&id)
            .map(|card| card.effects.for_type(effect_type))
            .unwrap_or(&[])
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }
}
