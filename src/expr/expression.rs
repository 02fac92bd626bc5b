//! Boolean expression trees.
//!
//! An expression combines conditions (and nested expressions) under a
//! single AND/OR operator. Leaves are [`Condition`]s; the tree is a closed
//! sum type with a `kind` discriminant for serialization.

use serde::{Deserialize, Serialize};

use super::condition::Condition;

/// The combining operator of an expression node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoolOperator {
    And,
    Or,
}

/// One child of an expression: a leaf condition or a sub-expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Term {
    Condition(Condition),
    Expression(BooleanExpression),
}

impl From<Condition> for Term {
    fn from(condition: Condition) -> Self {
        Self::Condition(condition)
    }
}

impl From<BooleanExpression> for Term {
    fn from(expression: BooleanExpression) -> Self {
        Self::Expression(expression)
    }
}

/// A recursive boolean expression over typed conditions.
///
/// ```
/// use gridwar::expr::{BooleanExpression, ComparisonOp, Condition};
///
/// let expr = BooleanExpression::and([
///     Condition::numeric("age", ComparisonOp::Gt, 20.0),
///     Condition::string("name", ComparisonOp::Eq, "John"),
/// ]);
/// assert_eq!(expr.conditions.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BooleanExpression {
    pub operator: BoolOperator,
    pub conditions: Vec<Term>,
}

impl BooleanExpression {
    /// Create an expression from an operator and child terms.
    #[must_use]
    pub fn new(operator: BoolOperator, conditions: Vec<Term>) -> Self {
        Self {
            operator,
            conditions,
        }
    }

    /// Create an AND expression.
    #[must_use]
    pub fn and<T: Into<Term>>(conditions: impl IntoIterator<Item = T>) -> Self {
        Self::new(
            BoolOperator::And,
            conditions.into_iter().map(Into::into).collect(),
        )
    }

    /// Create an OR expression.
    #[must_use]
    pub fn or<T: Into<Term>>(conditions: impl IntoIterator<Item = T>) -> Self {
        Self::new(
            BoolOperator::Or,
            conditions.into_iter().map(Into::into).collect(),
        )
    }

    /// An AND of nothing, which evaluates to `true`. The conventional
    /// "no guard" expression for cards without conditions.
    #[must_use]
    pub fn always() -> Self {
        Self::and(Vec::<Term>::new())
    }

    /// Append another term to this expression.
    pub fn push(&mut self, term: impl Into<Term>) {
        self.conditions.push(term.into());
    }
}
