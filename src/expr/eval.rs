//! Expression evaluation.
//!
//! `Evaluator` walks an expression tree against JSON-shaped data:
//!
//! - AND short-circuits to `false` on the first failing child.
//! - OR short-circuits to `true` on the first succeeding child.
//! - Errors from a child propagate unless an earlier child already
//!   short-circuited the result.
//! - Leaves resolve their path and compare; an unresolvable path or a
//!   value of the wrong kind is an error, never a silent `false`.

use serde_json::Value;

use super::condition::{ArrayOp, ComparisonOp, Condition};
use super::expression::{BoolOperator, BooleanExpression, Term};
use super::path::resolve;

/// An evaluation failure, naming the offending path or operator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("path `{0}` did not resolve against the evaluated data")]
    UnresolvedPath(String),

    #[error("value at `{path}` is not {expected}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
    },

    #[error("operator `{operator}` is not supported for {kind} conditions")]
    UnsupportedOperator {
        operator: &'static str,
        kind: &'static str,
    },
}

/// Evaluates boolean expressions against data.
pub struct Evaluator;

impl Evaluator {
    /// Evaluate an expression tree against `data`.
    pub fn evaluate(expression: &BooleanExpression, data: &Value) -> Result<bool, EvalError> {
        match expression.operator {
            BoolOperator::And => {
                for term in &expression.conditions {
                    if !Self::evaluate_term(term, data)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            BoolOperator::Or => {
                for term in &expression.conditions {
                    if Self::evaluate_term(term, data)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    fn evaluate_term(term: &Term, data: &Value) -> Result<bool, EvalError> {
        match term {
            Term::Condition(condition) => Self::evaluate_condition(condition, data),
            Term::Expression(expression) => Self::evaluate(expression, data),
        }
    }

    /// Evaluate a single leaf condition against `data`.
    pub fn evaluate_condition(condition: &Condition, data: &Value) -> Result<bool, EvalError> {
        match condition {
            Condition::Numeric { path, op, expected } => {
                let actual = numeric_at(path, data)?;
                Ok(compare_numeric(*op, actual, *expected))
            }
            Condition::String { path, op, expected } => {
                let actual = string_at(path, data)?;
                compare_equality(*op, "string", actual == expected)
            }
            Condition::Boolean { path, op, expected } => {
                let actual = boolean_at(path, data)?;
                compare_equality(*op, "boolean", actual == *expected)
            }
            Condition::Array { path, op, expected } => {
                let value = value_at(path, data)?;
                // A single non-array value degrades to a one-element array.
                let actual = match value {
                    Value::Array(items) => items.as_slice(),
                    other => std::slice::from_ref(other),
                };
                Ok(match op {
                    ArrayOp::Contains | ArrayOp::ContainsAll => contains_all(actual, expected),
                    ArrayOp::ContainsAny => contains_any(actual, expected),
                    ArrayOp::NotContains => !contains_all(actual, expected),
                })
            }
        }
    }
}

fn compare_numeric(op: ComparisonOp, actual: f64, expected: f64) -> bool {
    match op {
        ComparisonOp::Eq => actual == expected,
        ComparisonOp::Ne => actual != expected,
        ComparisonOp::Gt => actual > expected,
        ComparisonOp::Ge => actual >= expected,
        ComparisonOp::Lt => actual < expected,
        ComparisonOp::Le => actual <= expected,
    }
}

fn compare_equality(op: ComparisonOp, kind: &'static str, equal: bool) -> Result<bool, EvalError> {
    match op {
        ComparisonOp::Eq => Ok(equal),
        ComparisonOp::Ne => Ok(!equal),
        ordering => Err(EvalError::UnsupportedOperator {
            operator: ordering.symbol(),
            kind,
        }),
    }
}

/// Every expected element has a structurally-equal match in `actual`.
fn contains_all(actual: &[Value], expected: &[Value]) -> bool {
    expected.iter().all(|e| actual.contains(e))
}

/// At least one expected element has a structurally-equal match in `actual`.
fn contains_any(actual: &[Value], expected: &[Value]) -> bool {
    expected.iter().any(|e| actual.contains(e))
}

fn value_at<'a>(path: &str, data: &'a Value) -> Result<&'a Value, EvalError> {
    resolve(path, data).ok_or_else(|| EvalError::UnresolvedPath(path.to_string()))
}

fn numeric_at(path: &str, data: &Value) -> Result<f64, EvalError> {
    value_at(path, data)?
        .as_f64()
        .ok_or_else(|| EvalError::TypeMismatch {
            path: path.to_string(),
            expected: "a number",
        })
}

fn string_at<'a>(path: &str, data: &'a Value) -> Result<&'a str, EvalError> {
    value_at(path, data)?
        .as_str()
        .ok_or_else(|| EvalError::TypeMismatch {
            path: path.to_string(),
            expected: "a string",
        })
}

fn boolean_at(path: &str, data: &Value) -> Result<bool, EvalError> {
    value_at(path, data)?
        .as_bool()
        .ok_or_else(|| EvalError::TypeMismatch {
            path: path.to_string(),
            expected: "a boolean",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_and_evaluates_all_children() {
        let data = json!({"age": 25, "name": "John", "active": true});
        let expr = BooleanExpression::and([
            Condition::numeric("age", ComparisonOp::Gt, 20.0),
            Condition::string("name", ComparisonOp::Eq, "John"),
        ]);

        assert_eq!(Evaluator::evaluate(&expr, &data), Ok(true));
    }

    #[test]
    fn test_or_succeeds_on_any_child() {
        let data = json!({"score": 75, "grade": "B"});
        let expr = BooleanExpression::or([
            Condition::numeric("score", ComparisonOp::Ge, 90.0),
            Condition::string("grade", ComparisonOp::Eq, "B"),
        ]);

        assert_eq!(Evaluator::evaluate(&expr, &data), Ok(true));
    }

    #[test]
    fn test_and_short_circuits_past_erroring_child() {
        let data = json!({"age": 10});
        // First child is false; the second would error on a missing path.
        let expr = BooleanExpression::and([
            Condition::numeric("age", ComparisonOp::Gt, 20.0),
            Condition::numeric("nonexistent", ComparisonOp::Eq, 1.0),
        ]);

        assert_eq!(Evaluator::evaluate(&expr, &data), Ok(false));
    }

    #[test]
    fn test_or_short_circuits_past_erroring_child() {
        let data = json!({"age": 30});
        let expr = BooleanExpression::or([
            Condition::numeric("age", ComparisonOp::Gt, 20.0),
            Condition::numeric("nonexistent", ComparisonOp::Eq, 1.0),
        ]);

        assert_eq!(Evaluator::evaluate(&expr, &data), Ok(true));
    }

    #[test]
    fn test_error_propagates_before_short_circuit() {
        let data = json!({"value": 42});
        let expr = BooleanExpression::and([
            Condition::numeric("$.nonexistent", ComparisonOp::Eq, 42.0),
            Condition::numeric("value", ComparisonOp::Eq, 42.0),
        ]);

        assert_eq!(
            Evaluator::evaluate(&expr, &data),
            Err(EvalError::UnresolvedPath("$.nonexistent".to_string()))
        );
    }

    #[test]
    fn test_numeric_operator_table() {
        let data = json!({"value": 50});
        let cases = [
            (ComparisonOp::Eq, 50.0, true),
            (ComparisonOp::Ne, 51.0, true),
            (ComparisonOp::Gt, 49.0, true),
            (ComparisonOp::Ge, 50.0, true),
            (ComparisonOp::Lt, 51.0, true),
            (ComparisonOp::Le, 50.0, true),
            (ComparisonOp::Gt, 50.0, false),
        ];

        for (op, expected, result) in cases {
            let expr = BooleanExpression::and([Condition::numeric("value", op, expected)]);
            assert_eq!(
                Evaluator::evaluate(&expr, &data),
                Ok(result),
                "operator {}",
                op.symbol()
            );
        }
    }

    #[test]
    fn test_string_conditions() {
        let data = json!({"text": "hello"});
        let cases = [
            (ComparisonOp::Eq, "hello", true),
            (ComparisonOp::Eq, "world", false),
            (ComparisonOp::Ne, "world", true),
            (ComparisonOp::Ne, "hello", false),
        ];

        for (op, expected, result) in cases {
            let expr = BooleanExpression::and([Condition::string("text", op, expected)]);
            assert_eq!(Evaluator::evaluate(&expr, &data), Ok(result));
        }
    }

    #[test]
    fn test_boolean_conditions() {
        let data = json!({"flag": true});
        let cases = [
            (ComparisonOp::Eq, true, true),
            (ComparisonOp::Eq, false, false),
            (ComparisonOp::Ne, false, true),
            (ComparisonOp::Ne, true, false),
        ];

        for (op, expected, result) in cases {
            let expr = BooleanExpression::and([Condition::boolean("flag", op, expected)]);
            assert_eq!(Evaluator::evaluate(&expr, &data), Ok(result));
        }
    }

    #[test]
    fn test_ordering_on_string_is_an_error() {
        let data = json!({"text": "hello"});
        let expr = BooleanExpression::and([Condition::string("text", ComparisonOp::Gt, "a")]);

        assert_eq!(
            Evaluator::evaluate(&expr, &data),
            Err(EvalError::UnsupportedOperator {
                operator: ">",
                kind: "string",
            })
        );
    }

    #[test]
    fn test_array_operator_table() {
        let data = json!({"tags": ["tag1", "tag2", "tag3"]});
        let cases = [
            (ArrayOp::Contains, vec!["tag1"], true),
            (ArrayOp::Contains, vec!["tag4"], false),
            (ArrayOp::ContainsAll, vec!["tag1", "tag2"], true),
            (ArrayOp::ContainsAll, vec!["tag1", "tag4"], false),
            (ArrayOp::ContainsAny, vec!["tag1", "tag4"], true),
            (ArrayOp::ContainsAny, vec!["tag4", "tag5"], false),
            (ArrayOp::NotContains, vec!["tag4"], true),
            (ArrayOp::NotContains, vec!["tag1"], false),
        ];

        for (op, expected, result) in cases {
            let expected: Vec<Value> = expected.into_iter().map(Value::from).collect();
            let expr = BooleanExpression::and([Condition::array("tags", op, expected)]);
            assert_eq!(Evaluator::evaluate(&expr, &data), Ok(result), "{:?}", op);
        }
    }

    #[test]
    fn test_single_value_degrades_to_array() {
        let data = json!({"role": "admin"});
        let expr = BooleanExpression::and([Condition::array(
            "role",
            ArrayOp::Contains,
            vec!["admin".into()],
        )]);

        assert_eq!(Evaluator::evaluate(&expr, &data), Ok(true));
    }

    #[test]
    fn test_nested_expressions() {
        let data = json!({"user": {"age": 30, "active": true}});
        let expr = BooleanExpression::and([
            Condition::numeric("user.age", ComparisonOp::Gt, 25.0),
            Condition::boolean("user.active", ComparisonOp::Eq, true),
        ]);

        assert_eq!(Evaluator::evaluate(&expr, &data), Ok(true));

        let data = json!({"user": {"age": 20, "active": true}});
        assert_eq!(Evaluator::evaluate(&expr, &data), Ok(false));
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let data = json!({"value": 42});
        let expr = BooleanExpression::and([Condition::numeric(
            "$.nonexistent",
            ComparisonOp::Eq,
            42.0,
        )]);

        assert!(Evaluator::evaluate(&expr, &data).is_err());
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let data = json!({"value": "forty-two"});
        let expr = BooleanExpression::and([Condition::numeric("value", ComparisonOp::Eq, 42.0)]);

        assert_eq!(
            Evaluator::evaluate(&expr, &data),
            Err(EvalError::TypeMismatch {
                path: "value".to_string(),
                expected: "a number",
            })
        );
    }

    #[test]
    fn test_integer_values_coerce_to_f64() {
        let data = json!({"count": 3});
        let expr = BooleanExpression::and([Condition::numeric("count", ComparisonOp::Eq, 3.0)]);

        assert_eq!(Evaluator::evaluate(&expr, &data), Ok(true));
    }

    #[test]
    fn test_empty_and_is_true_empty_or_is_false() {
        let data = json!({});
        assert_eq!(
            Evaluator::evaluate(&BooleanExpression::always(), &data),
            Ok(true)
        );
        assert_eq!(
            Evaluator::evaluate(&BooleanExpression::or(Vec::<Condition>::new()), &data),
            Ok(false)
        );
    }
}
