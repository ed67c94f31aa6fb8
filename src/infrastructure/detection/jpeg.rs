use image::{DynamicImage, GenericImageView, codecs::jpeg::JpegEncoder};
use tracing::debug;

use crate::domain::detection::errors::DetectionError;

/// Compression quality the plate service was tuned against.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Encodes a captured raster as baseline JPEG.
///
/// Alpha is dropped since JPEG has no alpha channel. Images without pixels
/// are rejected up front so no request is ever built for them.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, DetectionError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(DetectionError::Encoding(format!(
            "image has no pixels ({}x{})",
            width, height
        )));
    }

    let rgb = image.to_rgb8();
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .encode_image(&rgb)
        .map_err(|e| DetectionError::Encoding(e.to_string()))?;

    debug!(
        "Encoded {}x{} image at quality {}, {} bytes",
        width,
        height,
        quality,
        buffer.len()
    );
    Ok(buffer)
}
