//! Creation/update timestamps carried by persisted aggregates.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Timestamps in Unix milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub created_at_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at_ms: Option<i64>,
}

impl Metadata {
    /// Stamp a new record with the current time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            created_at_ms: now_ms(),
            updated_at_ms: None,
        }
    }

    /// Mark the record as updated at the current time.
    pub fn touch(&mut self) {
        self.updated_at_ms = Some(now_ms());
    }
}
