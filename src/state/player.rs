//! Per-player battle state.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{shuffle_cards, Deck};
use crate::core::{CardId, Position, UserId};

use super::game::Rules;

/// A player's hand. Inline capacity matches the default hand limit; the
/// limit itself is enforced by the hand runner against [`Rules`].
pub type Hand = SmallVec<[CardId; 5]>;

/// Which side of the match a player occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    P1,
    P2,
}

impl Seat {
    /// Index into the two-player array.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::P1 => 0,
            Self::P2 => 1,
        }
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::P1 => Self::P2,
            Self::P2 => Self::P1,
        }
    }

    /// Both seats, in player order.
    #[must_use]
    pub const fn both() -> [Seat; 2] {
        [Self::P1, Self::P2]
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::P1 => write!(f, "player 1"),
            Self::P2 => write!(f, "player 2"),
        }
    }
}

/// Everything the game tracks about one player.
///
/// Owned exclusively by the containing `GameStateData`; mutated only
/// through the runner layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub user: UserId,
    pub hand: Hand,
    pub deck: Vec<CardId>,
    pub discarded_cards: Vec<CardId>,
    pub points: i64,
    /// Board position selected for the current War, if any.
    pub selected_card: Option<Position>,
    /// Positions whose cards this player has seen.
    pub revealed_cards: FxHashSet<Position>,
    /// Board positions this player knows to be empty.
    pub empty_spaces: FxHashSet<Position>,
    pub last_placed_card: Option<CardId>,
    pub last_drawn_card: Option<CardId>,
    pub last_discarded_card: Option<CardId>,
    pub has_drawn_this_turn: bool,
    pub has_swapped_this_turn: bool,
    pub has_discarded_this_turn: bool,
}

impl PlayerState {
    /// Build a player's starting state from a stored deck: shuffle, then
    /// deal the starting hand off the front of the shuffled sequence.
    #[must_use]
    pub fn new(user: UserId, deck: &Deck, rules: &Rules) -> Self {
        let mut shuffled = shuffle_cards(&deck.card_ids);
        let deal = rules.starting_hand_size.min(shuffled.len());
        let hand: Hand = shuffled.drain(..deal).collect();

        Self {
            user,
            hand,
            deck: shuffled,
            discarded_cards: Vec::new(),
            points: 0,
            selected_card: None,
            revealed_cards: FxHashSet::default(),
            empty_spaces: FxHashSet::default(),
            last_placed_card: None,
            last_drawn_card: None,
            last_discarded_card: None,
            has_drawn_this_turn: false,
            has_swapped_this_turn: false,
            has_discarded_this_turn: false,
        }
    }

    /// Reset per-turn state. Called exactly once per CardAction entry.
    pub fn begin_turn(&mut self) {
        self.has_drawn_this_turn = false;
        self.has_swapped_this_turn = false;
        self.has_discarded_this_turn = false;
        self.selected_card = None;
    }
}
