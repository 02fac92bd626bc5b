//! Card definitions - static card data.
//!
//! A `Card` holds the immutable properties of a playing card: identity,
//! presentation (suite, rarity, tribe, artwork) and the effect lists that
//! fire on each trigger. Mutable battle state lives in the game state,
//! not here.

use serde::{Deserialize, Serialize};

use super::effect::CardEffects;
use crate::core::CardId;

/// Card suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suite {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

/// Card rarity tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Card tribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tribe {
    Military,
    Magic,
    Tech,
    Nature,
}

/// Face rank for face cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Jack,
    Queen,
    King,
    Ace,
}

impl Face {
    /// Rank used when faces are compared in a War.
    #[must_use]
    pub const fn rank(self) -> i64 {
        match self {
            Self::Jack => 11,
            Self::Queen => 12,
            Self::King => 13,
            Self::Ace => 14,
        }
    }
}

/// Face or number variant of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardKind {
    Face { face: Face },
    Number { number: i64 },
}

/// A card definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub artwork_url: String,
    pub suite: Suite,
    pub rarity: Rarity,
    pub tribe: Tribe,
    #[serde(flatten)]
    pub kind: CardKind,
    #[serde(default)]
    pub effects: CardEffects,
}

impl Card {
    /// Create a number card with no effects.
    #[must_use]
    pub fn number(id: CardId, suite: Suite, number: i64) -> Self {
        Self {
            id,
            artwork_url: String::new(),
            suite,
            rarity: Rarity::Common,
            tribe: Tribe::Military,
            kind: CardKind::Number { number },
            effects: CardEffects::default(),
        }
    }

    /// Create a face card with no effects.
    #[must_use]
    pub fn face(id: CardId, suite: Suite, face: Face) -> Self {
        Self {
            id,
            artwork_url: String::new(),
            suite,
            rarity: Rarity::Common,
            tribe: Tribe::Military,
            kind: CardKind::Face { face },
            effects: CardEffects::default(),
        }
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set the tribe (builder pattern).
    #[must_use]
    pub fn with_tribe(mut self, tribe: Tribe) -> Self {
        self.tribe = tribe;
        self
    }

    /// Set the effect lists (builder pattern).
    #[must_use]
    pub fn with_effects(mut self, effects: CardEffects) -> Self {
        self.effects = effects;
        self
    }

    /// Base value used when this card is compared in a War.
    ///
    /// Number cards use their number; faces rank Jack 11 through Ace 14.
    #[must_use]
    pub fn war_value(&self) -> i64 {
        match &self.kind {
            CardKind::Number { number } => *number,
            CardKind::Face { face } => face.rank(),
        }
    }
}
