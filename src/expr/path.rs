//! Dotted-path resolution into JSON-shaped data.

use serde_json::Value;

/// Resolve a dotted path (`"user.age"`, `"players.0.points"`) against a
/// value. Numeric segments index into arrays. Returns `None` when any
/// segment fails to resolve.
pub(crate) fn resolve<'a>(path: &str, data: &'a Value) -> Option<&'a Value> {
    let mut current = data;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
