//! Client configuration loading from environment variables.
//!
//! Configuration is read once at startup. A `.env` file is honoured by the
//! binary through `dotenvy` before [`Config::from_env`] runs.
//!
//! # Environment Variables
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,plate_client=debug")
//! - `PLATE_ENDPOINT_URL`: Detection endpoint (default: the hosted plate service)
//! - `PLATE_JPEG_QUALITY`: JPEG quality used for uploads, 1-100 (default: 80)

use crate::infrastructure::detection::jpeg::DEFAULT_JPEG_QUALITY;
use validator::Validate;

pub const DEFAULT_ENDPOINT_URL: &str = "https://plate-backend-mcsd.onrender.com/api/v1/plate/detect";

/// Complete client configuration loaded from environment.
#[derive(Debug, Clone, Validate)]
pub struct Config {
    /// Fixed URL every detection call is posted to
    #[validate(url)]
    pub endpoint_url: String,

    /// JPEG compression quality for uploaded photos
    #[validate(range(min = 1, max = 100))]
    pub jpeg_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or if the
    /// resulting values fail validation.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            endpoint_url: env_or(&lookup, "PLATE_ENDPOINT_URL", DEFAULT_ENDPOINT_URL.to_string())?,
            jpeg_quality: env_or(&lookup, "PLATE_JPEG_QUALITY", DEFAULT_JPEG_QUALITY)?,
        };
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
        Ok(config)
    }
}

/// Load a variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        None => Ok(default),
    }
}
