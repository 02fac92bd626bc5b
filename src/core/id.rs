//! Identifier newtypes.
//!
//! Every domain object gets its own ID type so a deck ID can never be
//! handed to a user lookup. Generated IDs follow a sortable scheme:
//! millisecond timestamp scaled by 10^6 plus a random entropy component.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

const ENTROPY_RANGE: u64 = 1_000_000;

fn generate_raw() -> u64 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let entropy = rand::thread_rng().gen_range(0..ENTROPY_RANGE);
    millis * ENTROPY_RANGE + entropy
}

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident, $display:literal) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl $name {
            /// Create an ID from a raw value.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Generate a fresh ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(generate_raw())
            }

            /// Get the raw ID value.
            #[must_use]
            pub const fn raw(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($display, "({})"), self.0)
            }
        }
    };
}

id_type!(
    /// Identifier for a card definition.
    CardId,
    "Card"
);

id_type!(
    /// Identifier for a stored deck.
    DeckId,
    "Deck"
);

id_type!(
    /// Identifier for a user.
    UserId,
    "User"
);

id_type!(
    /// Identifier for a game state aggregate.
    GameStateId,
    "GameState"
);

id_type!(
    /// Identifier for one entry in the version log.
    GameStateVersionId,
    "GameStateVersion"
);
