use async_trait::async_trait;
use image::DynamicImage;

use crate::domain::detection::{entity::DetectionResult, errors::DetectionError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlateDetector: Send + Sync {
    /// Run one detection call for a captured image
    async fn detect(&self, image: &DynamicImage) -> Result<DetectionResult, DetectionError>;
}
