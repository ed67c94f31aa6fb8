use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A detection the user chose to keep.
///
/// Created only by an explicit save, never mutated afterwards, and kept in
/// memory for the lifetime of the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistoryEntry {
    /// Process-unique identifier
    pub id: Uuid,

    /// Plate text copied from the saved result
    pub text: String,

    /// Recognition confidence, 0.0 when the service reported none
    pub confidence: f64,

    /// Moment of saving
    pub captured_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            confidence,
            captured_at: Utc::now(),
        }
    }
}
