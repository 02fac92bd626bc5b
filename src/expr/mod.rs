//! The condition language used to gate card effects.
//!
//! Expressions are recursive AND/OR trees over typed leaf conditions,
//! each anchored to a dotted path into JSON-shaped data. The evaluator
//! short-circuits and surfaces every failure as an [`EvalError`].

pub mod condition;
pub mod eval;
pub mod expression;
mod path;

pub use condition::{ArrayOp, ComparisonOp, Condition};
pub use eval::{EvalError, Evaluator};
pub use expression::{BoolOperator, BooleanExpression, Term};
