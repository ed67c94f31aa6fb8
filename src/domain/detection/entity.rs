use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::errors::ResultDecodeError;

/// Outcome of one detection call as reported by the plate service.
///
/// The wire payload uses the service's field names (`success`, `plate_text`,
/// `bbox`, `detail`); the struct exposes them under descriptive names and
/// serializes back to the same wire shape.
///
/// # Invariants
/// - `succeeded == true` is expected to come with `plate_text`; consumers go
///   through [`DetectionResult::plate`], which only yields text for a
///   successful result.
/// - `succeeded == false` usually carries `detail_message`, but its absence is
///   not a decoding error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DetectionResult {
    /// Whether the service recognized a plate
    #[serde(rename = "success")]
    pub succeeded: bool,

    /// Recognized plate text
    pub plate_text: Option<String>,

    /// Recognition confidence in `[0, 1]`
    pub confidence: Option<f64>,

    /// Plate location in the uploaded image
    #[serde(rename = "bbox")]
    pub bounding_box: Option<BoundingBox>,

    /// Human-readable failure description from the service
    #[serde(rename = "detail")]
    pub detail_message: Option<String>,
}

/// Plate region in integer pixel coordinates, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "w")]
    pub width: i32,
    #[serde(rename = "h")]
    pub height: i32,
}

/// Error-shaped body the service sends with a non-2xx status.
///
/// Same schema as [`DetectionResult`] with every field optional; a body such
/// as `{"detail":"No plate found"}` decodes with `succeeded == false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ServiceErrorPayload {
    #[serde(rename = "success", default)]
    pub succeeded: bool,
    pub plate_text: Option<String>,
    pub confidence: Option<f64>,
    #[serde(rename = "bbox")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(rename = "detail")]
    pub detail_message: Option<String>,
}

impl DetectionResult {
    /// Decodes a success body. `success` is mandatory and must be a boolean.
    pub fn from_slice(body: &[u8]) -> Result<Self, ResultDecodeError> {
        serde_json::from_slice(body).map_err(ResultDecodeError::from)
    }

    /// Builds the `succeeded: false` shape the service uses for failures.
    pub fn service_error(detail: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            plate_text: None,
            confidence: None,
            bounding_box: None,
            detail_message: Some(detail.into()),
        }
    }

    /// Plate text of a successful, non-empty recognition.
    pub fn plate(&self) -> Option<&str> {
        if !self.succeeded {
            return None;
        }
        self.plate_text.as_deref().filter(|text| !text.is_empty())
    }
}

impl ServiceErrorPayload {
    /// Lenient decode used for error statuses; any failure means "no payload".
    pub fn from_slice(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}
