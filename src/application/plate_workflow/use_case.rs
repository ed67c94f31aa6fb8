use super::dto::WorkflowState;
use crate::{
    domain::{
        detection::{entity::DetectionResult, errors::DetectionError},
        history::entity::HistoryEntry,
    },
    infrastructure::detection::traits::PlateDetector,
};
use image::DynamicImage;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Shown when the service reports a failed recognition without a `detail`.
pub const DETECTION_FAILED_FALLBACK: &str = "could not detect the plate";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("a detection is already in progress")]
    DetectionInFlight,
}

/// Drives detection cycles and owns the session history.
///
/// State lives in a `watch` channel: the workflow is the only writer, the
/// presentation layer reads through [`PlateWorkflow::subscribe`] or
/// [`PlateWorkflow::snapshot`].
///
/// # Single flight
/// `is_detecting` is taken atomically at the start of [`PlateWorkflow::detect`].
/// A trigger while a call is in flight is rejected with
/// [`WorkflowError::DetectionInFlight`] and leaves the state untouched.
pub struct PlateWorkflow {
    detector: Arc<dyn PlateDetector>,
    state: watch::Sender<WorkflowState>,
}

impl PlateWorkflow {
    pub fn new(detector: Arc<dyn PlateDetector>) -> Self {
        let (state, _) = watch::channel(WorkflowState::default());
        Self { detector, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> WorkflowState {
        self.state.borrow().clone()
    }

    pub fn is_detecting(&self) -> bool {
        self.state.borrow().is_detecting
    }

    /// Saved detections, most recent first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.state.borrow().history.clone()
    }

    /// Runs one detection cycle and publishes its outcome.
    ///
    /// Failures of the call itself end up in `last_error`; the only error
    /// returned here is the single-flight rejection.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub async fn detect(&self, image: &DynamicImage) -> Result<(), WorkflowError> {
        let in_flight = self.begin_detection()?;

        let outcome = self.detector.detect(image).await;
        match &outcome {
            Ok(result) if result.succeeded => info!(
                plate = result.plate_text.as_deref().unwrap_or("-"),
                confidence = result.confidence.unwrap_or(0.0),
                "Plate detected"
            ),
            Ok(result) => info!(
                detail = result.detail_message.as_deref().unwrap_or("-"),
                "Service could not recognize a plate"
            ),
            Err(e) => warn!("Detection call failed: {}", e),
        }

        in_flight.finish(outcome);
        Ok(())
    }

    /// Copies the current successful result into the history.
    ///
    /// Returns the new entry, or `None` when there is no successful result
    /// with plate text to save.
    pub fn save(&self) -> Option<HistoryEntry> {
        let mut saved = None;
        self.state.send_if_modified(|state| {
            let Some(result) = state.last_result.as_ref() else {
                return false;
            };
            let Some(text) = result.plate() else {
                return false;
            };
            let entry = HistoryEntry::new(text, result.confidence.unwrap_or(0.0));
            state.history.insert(0, entry.clone());
            saved = Some(entry);
            true
        });

        match &saved {
            Some(entry) => info!(id = %entry.id, plate = %entry.text, "Saved plate to history"),
            None => debug!("Nothing to save"),
        }
        saved
    }

    /// Drops the previous result and error, e.g. when a new photo is picked.
    pub fn clear_result(&self) {
        self.state.send_if_modified(|state| {
            if state.last_result.is_none() && state.last_error.is_none() {
                return false;
            }
            state.last_result = None;
            state.last_error = None;
            true
        });
    }

    fn begin_detection(&self) -> Result<InFlight<'_>, WorkflowError> {
        let mut accepted = false;
        self.state.send_if_modified(|state| {
            if state.is_detecting {
                return false;
            }
            state.is_detecting = true;
            state.last_result = None;
            state.last_error = None;
            accepted = true;
            true
        });

        if accepted {
            Ok(InFlight {
                state: &self.state,
                finished: false,
            })
        } else {
            warn!("Rejected detection trigger while another call is in flight");
            Err(WorkflowError::DetectionInFlight)
        }
    }
}

/// Holds the single-flight flag; releases it on drop if the call future is
/// dropped before completing.
struct InFlight<'a> {
    state: &'a watch::Sender<WorkflowState>,
    finished: bool,
}

impl InFlight<'_> {
    fn finish(mut self, outcome: Result<DetectionResult, DetectionError>) {
        self.state.send_modify(|state| {
            state.is_detecting = false;
            match outcome {
                Ok(result) => {
                    state.last_error = if result.succeeded {
                        None
                    } else {
                        Some(
                            result
                                .detail_message
                                .clone()
                                .unwrap_or_else(|| DETECTION_FAILED_FALLBACK.to_string()),
                        )
                    };
                    state.last_result = Some(result);
                }
                Err(e) => {
                    state.last_result = None;
                    state.last_error = Some(e.to_string());
                }
            }
        });
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.state.send_modify(|state| state.is_detecting = false);
        }
    }
}
