use crate::domain::{detection::entity::DetectionResult, history::entity::HistoryEntry};
use serde::Serialize;
use ts_rs::TS;

/// Everything the presentation layer renders, published by [`super::use_case::PlateWorkflow`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct WorkflowState {
    /// A detection call is in flight; new triggers are rejected while set
    pub is_detecting: bool,

    /// Result of the most recent completed call, if it produced one
    pub last_result: Option<DetectionResult>,

    /// Message for the most recent failure
    pub last_error: Option<String>,

    /// Saved detections, most recent first
    pub history: Vec<HistoryEntry>,
}
