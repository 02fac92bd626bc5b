//! Stored decks and shuffling.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::{CardId, DeckId, Metadata, UserId};

/// A user's stored deck of card IDs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub user: UserId,
    pub card_ids: Vec<CardId>,
    pub name: String,
    pub favorited: bool,
    pub games_played: u32,
    pub games_won: u32,
    pub metadata: Metadata,
}

impl Deck {
    /// Create a deck; an empty name defaults to "New Deck".
    #[must_use]
    pub fn new(id: DeckId, user: UserId, card_ids: Vec<CardId>, name: impl Into<String>) -> Self {
        let mut name = name.into();
        if name.is_empty() {
            name = "New Deck".to_string();
        }
        Self {
            id,
            user,
            card_ids,
            name,
            favorited: false,
            games_played: 0,
            games_won: 0,
            metadata: Metadata::now(),
        }
    }
}

/// Return a uniformly shuffled copy of `cards`.
///
/// Fisher-Yates over a ChaCha8 generator seeded freshly from entropy on
/// every call; shuffles are intentionally not replayable. The input is
/// left untouched.
#[must_use]
pub fn shuffle_cards(cards: &[CardId]) -> Vec<CardId> {
    let mut shuffled = cards.to_vec();
    let mut rng = ChaCha8Rng::from_entropy();
    shuffled.shuffle(&mut rng);
    shuffled
}
