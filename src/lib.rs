//! Client for a remote license-plate detection service.
//!
//! A captured photo is encoded to JPEG, uploaded as a one-part multipart
//! form, and the JSON reply is turned into a typed [`DetectionResult`] or a
//! classified [`DetectionError`]. [`PlateWorkflow`] drives detection cycles
//! for a presentation layer and keeps the session history.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::plate_workflow::{
    dto::WorkflowState,
    use_case::{PlateWorkflow, WorkflowError},
};
pub use domain::detection::{entity::DetectionResult, errors::DetectionError};
pub use infrastructure::detection::{http_detector::HttpPlateDetector, traits::PlateDetector};
