//! Card effect declarations.
//!
//! An effect is a guarding [`BooleanExpression`] plus lists of attribute
//! records describing what happens when the guard holds. Effects are pure
//! data; the runner layer evaluates and applies them.

use serde::{Deserialize, Serialize};

use crate::expr::BooleanExpression;

/// The action or trigger point an effect is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardEffectType {
    Draw,
    Swap,
    Place,
    Reveal,
    War,
    Discard,
}

/// Shared attributes of a declared effect outcome.
///
/// `amount` is absent for outcomes that carry no magnitude
/// (position swaps).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectAttributes {
    pub is_quick_effect: bool,
    pub for_opponent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

impl EffectAttributes {
    /// An outcome applying to the activator with the given amount.
    #[must_use]
    pub fn amount(amount: i64) -> Self {
        Self {
            is_quick_effect: false,
            for_opponent: false,
            amount: Some(amount),
        }
    }

    /// Redirect this outcome to the opponent (builder pattern).
    #[must_use]
    pub fn opponent(mut self) -> Self {
        self.for_opponent = true;
        self
    }

    /// Mark as a quick effect (builder pattern).
    #[must_use]
    pub fn quick(mut self) -> Self {
        self.is_quick_effect = true;
        self
    }
}

/// A single guarded effect on a card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardEffect {
    /// Guard evaluated against a snapshot of the game state; the effect
    /// fires only when this holds.
    pub condition: BooleanExpression,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gain_value: Vec<EffectAttributes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gain_points: Vec<EffectAttributes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub swap_position: Vec<EffectAttributes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lose_value: Vec<EffectAttributes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lose_points: Vec<EffectAttributes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub draw: Vec<EffectAttributes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discard: Vec<EffectAttributes>,
}

impl CardEffect {
    /// An effect with the given guard and no outcomes.
    #[must_use]
    pub fn guarded(condition: BooleanExpression) -> Self {
        Self {
            condition,
            gain_value: Vec::new(),
            gain_points: Vec::new(),
            swap_position: Vec::new(),
            lose_value: Vec::new(),
            lose_points: Vec::new(),
            draw: Vec::new(),
            discard: Vec::new(),
        }
    }

    /// An unguarded effect (guard always holds).
    #[must_use]
    pub fn unguarded() -> Self {
        Self::guarded(BooleanExpression::always())
    }

    /// Add a gain-points outcome (builder pattern).
    #[must_use]
    pub fn with_gain_points(mut self, attrs: EffectAttributes) -> Self {
        self.gain_points.push(attrs);
        self
    }

    /// Add a lose-points outcome (builder pattern).
    #[must_use]
    pub fn with_lose_points(mut self, attrs: EffectAttributes) -> Self {
        self.lose_points.push(attrs);
        self
    }

    /// Add a gain-value outcome (builder pattern).
    #[must_use]
    pub fn with_gain_value(mut self, attrs: EffectAttributes) -> Self {
        self.gain_value.push(attrs);
        self
    }

    /// Add a lose-value outcome (builder pattern).
    #[must_use]
    pub fn with_lose_value(mut self, attrs: EffectAttributes) -> Self {
        self.lose_value.push(attrs);
        self
    }

    /// Add a draw outcome (builder pattern).
    #[must_use]
    pub fn with_draw(mut self, attrs: EffectAttributes) -> Self {
        self.draw.push(attrs);
        self
    }

    /// Add a discard outcome (builder pattern).
    #[must_use]
    pub fn with_discard(mut self, attrs: EffectAttributes) -> Self {
        self.discard.push(attrs);
        self
    }
}

/// Per-trigger effect lists carried by a card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardEffects {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_draw: Vec<CardEffect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_reveal: Vec<CardEffect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_war: Vec<CardEffect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on_discard: Vec<CardEffect>,
}

impl CardEffects {
    /// The effect list attached to a trigger point.
    ///
    /// Swap and place actions share the reveal-side list shape but carry
    /// no declared effects of their own; they return the empty slice.
    #[must_use]
    pub fn for_type(&self, effect_type: CardEffectType) -> &[CardEffect] {
        match effect_type {
            CardEffectType::Draw => &self.on_draw,
            CardEffectType::Reveal => &self.on_reveal,
            CardEffectType::War => &self.on_war,
            CardEffectType::Discard => &self.on_discard,
            CardEffectType::Swap | CardEffectType::Place => &[],
        }
    }
}
