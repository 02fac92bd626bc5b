//! Typed leaf conditions.
//!
//! Each condition anchors to a dotted path into the evaluated data and
//! compares the resolved value against an expected value of the matching
//! kind. The kinds are a closed set with an explicit `type` discriminant
//! for serialization; evaluation is a single exhaustive match.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operator for scalar conditions.
///
/// Ordering operators are only defined for numeric conditions; string and
/// boolean conditions compare with `==`/`!=` alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl ComparisonOp {
    /// The operator's source-form symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }

    /// Whether this is an ordering operator (`>`, `>=`, `<`, `<=`).
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Ge | Self::Lt | Self::Le)
    }
}

/// Membership operator for array conditions.
///
/// `Contains` and `ContainsAll` share "every expected element is present"
/// semantics; both names are kept for compatibility with stored expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayOp {
    Contains,
    ContainsAll,
    ContainsAny,
    NotContains,
}

/// A leaf condition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Compare a number at `path` against `expected` (ints coerce to f64).
    Numeric {
        path: String,
        op: ComparisonOp,
        expected: f64,
    },
    /// Compare a string at `path` against `expected` with `==`/`!=`.
    String {
        path: String,
        op: ComparisonOp,
        expected: String,
    },
    /// Compare a boolean at `path` against `expected` with `==`/`!=`.
    Boolean {
        path: String,
        op: ComparisonOp,
        expected: bool,
    },
    /// Test membership of `expected` values in the array at `path`.
    /// A non-array value at the path is treated as a one-element array.
    Array {
        path: String,
        op: ArrayOp,
        expected: Vec<Value>,
    },
}

impl Condition {
    /// Create a numeric condition.
    #[must_use]
    pub fn numeric(path: impl Into<String>, op: ComparisonOp, expected: f64) -> Self {
        Self::Numeric {
            path: path.into(),
            op,
            expected,
        }
    }

    /// Create a string condition.
    #[must_use]
    pub fn string(path: impl Into<String>, op: ComparisonOp, expected: impl Into<String>) -> Self {
        Self::String {
            path: path.into(),
            op,
            expected: expected.into(),
        }
    }

    /// Create a boolean condition.
    #[must_use]
    pub fn boolean(path: impl Into<String>, op: ComparisonOp, expected: bool) -> Self {
        Self::Boolean {
            path: path.into(),
            op,
            expected,
        }
    }

    /// Create an array condition.
    #[must_use]
    pub fn array(path: impl Into<String>, op: ArrayOp, expected: Vec<Value>) -> Self {
        Self::Array {
            path: path.into(),
            op,
            expected,
        }
    }

    /// The path this condition resolves against the evaluated data.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Numeric { path, .. }
            | Self::String { path, .. }
            | Self::Boolean { path, .. }
            | Self::Array { path, .. } => path,
        }
    }
}
