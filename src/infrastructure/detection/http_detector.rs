use super::{jpeg::encode_jpeg, traits::PlateDetector};
use crate::{
    config::Config,
    domain::detection::{
        entity::{DetectionResult, ServiceErrorPayload},
        errors::DetectionError,
    },
};
use async_trait::async_trait;
use http::StatusCode;
use image::DynamicImage;
use reqwest::{
    Client, Url,
    multipart::{Form, Part},
};
use std::{error::Error as _, time::Instant};
use tracing::{debug, info, instrument, warn};

/// Multipart field the service reads the photo from.
pub const UPLOAD_FIELD: &str = "file";
pub const UPLOAD_FILE_NAME: &str = "photo.jpg";
pub const UPLOAD_MIME: &str = "image/jpeg";

/// Detection client talking to the plate service over HTTP.
///
/// Each call encodes the image, posts it as a one-part multipart form and
/// classifies whatever comes back. There is no retry, no auth header and no
/// timeout beyond the client defaults.
pub struct HttpPlateDetector {
    client: Client,
    endpoint: Url,
    jpeg_quality: u8,
}

impl HttpPlateDetector {
    pub fn new(endpoint: Url, jpeg_quality: u8) -> anyhow::Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint,
            jpeg_quality,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let endpoint = Url::parse(&config.endpoint_url)
            .map_err(|e| anyhow::anyhow!("Invalid detection endpoint {}: {}", config.endpoint_url, e))?;
        Self::new(endpoint, config.jpeg_quality)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PlateDetector for HttpPlateDetector {
    #[instrument(skip(self, image), fields(
        endpoint = %self.endpoint,
        width = image.width(),
        height = image.height()
    ))]
    async fn detect(&self, image: &DynamicImage) -> Result<DetectionResult, DetectionError> {
        let jpeg = encode_jpeg(image, self.jpeg_quality)?;
        let upload_size = jpeg.len();

        let part = Part::bytes(jpeg)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME)
            .map_err(|e| DetectionError::Encoding(format!("invalid upload content type: {}", e)))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let started = Instant::now();
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                let err = classify_send_error(e);
                warn!("Detection request failed: {}", err);
                err
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read detection response body: {}", e);
            DetectionError::Transport(e)
        })?;

        info!(
            status = status.as_u16(),
            upload_bytes = upload_size,
            response_bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Plate service responded"
        );

        let outcome = interpret_response(status, &body);
        if let Err(err) = &outcome {
            warn!(status = ?err.status(), "Detection failed: {}", err);
        }
        outcome
    }
}

/// Maps a received response onto a result or a classified failure.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<DetectionResult, DetectionError> {
    if body.is_empty() {
        return Err(DetectionError::EmptyResponse {
            status: status.as_u16(),
        });
    }

    if status.is_success() {
        let result = DetectionResult::from_slice(body)?;
        debug!(
            succeeded = result.succeeded,
            plate = result.plate_text.as_deref().unwrap_or("-"),
            "Decoded detection result"
        );
        return Ok(result);
    }

    let detail = ServiceErrorPayload::from_slice(body).and_then(|payload| payload.detail_message);
    Err(match detail {
        Some(message) => DetectionError::Service {
            status: status.as_u16(),
            message,
        },
        None => DetectionError::server_error(status.as_u16()),
    })
}

/// A send error is a protocol violation when hyper failed to parse what the
/// peer sent back; everything else means no response arrived.
fn classify_send_error(err: reqwest::Error) -> DetectionError {
    if is_parse_failure(&err) {
        DetectionError::Protocol(err)
    } else {
        DetectionError::Transport(err)
    }
}

fn is_parse_failure(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(hyper_err) = cause.downcast_ref::<hyper::Error>() {
            return hyper_err.is_parse();
        }
        source = cause.source();
    }
    false
}
