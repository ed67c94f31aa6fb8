use serde_json::error::Category;
use thiserror::Error;

/// Why a response body could not become a [`super::entity::DetectionResult`].
#[derive(Debug, Error)]
pub enum ResultDecodeError {
    /// Body is not JSON at all
    #[error("response body is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    /// JSON that does not fit the result schema (e.g. missing `success`)
    #[error("malformed detection response: {0}")]
    Malformed(#[source] serde_json::Error),
}

impl From<serde_json::Error> for ResultDecodeError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::Malformed(err),
            Category::Syntax | Category::Eof | Category::Io => Self::Syntax(err),
        }
    }
}

/// Every way a single detection call can fail. None of them are retried.
///
/// `Display` is the human-readable message shown to the user.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("could not encode the image as JPEG: {0}")]
    Encoding(String),

    #[error("could not reach the plate service: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("invalid response from the plate service")]
    Protocol(#[source] reqwest::Error),

    #[error("empty response from the plate service (status {status})")]
    EmptyResponse { status: u16 },

    #[error("could not read the plate service response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("unexpected response shape from the plate service: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl DetectionError {
    /// Generic message for an error status whose body carried no `detail`.
    pub fn server_error(status: u16) -> Self {
        Self::Service {
            status,
            message: format!("server error {}", status),
        }
    }

    /// HTTP status attached to the error, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::EmptyResponse { status } | Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ResultDecodeError> for DetectionError {
    fn from(err: ResultDecodeError) -> Self {
        match err {
            ResultDecodeError::Syntax(e) => Self::Decode(e),
            ResultDecodeError::Malformed(e) => Self::MalformedResponse(e),
        }
    }
}
