//! Image loading for collage requests.
//!
//! Fetches each requested locator, decodes the bytes, and normalizes the
//! result to an opaque RGBA raster. Loading is a partial-success affair:
//! per-image failures are collected, logged, and dropped, and only the
//! surviving images reach the layout pipeline.
//!
//! # Supported Sources
//!
//! - `https://example.com/photo.jpg`
//! - `http://example.com/photo.jpg` (photo hosts routinely redirect
//!   through plain http)

use async_trait::async_trait;
use image::{DynamicImage, RgbaImage};
use std::io::Cursor;
use std::time::Duration;
use thiserror::Error;

use crate::constants::{DEFAULT_FETCH_TIMEOUT_SECS, FETCH_ACCEPT, FETCH_USER_AGENT};

/// Per-image load failure.
///
/// These are logged and swallowed at the loading stage; the request
/// continues with the remaining images.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported locator scheme: {0}")]
    Scheme(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("image has a zero dimension ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Validated image locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLocator(String);

impl ImageLocator {
    /// Parse a locator string, accepting http and https URLs.
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        if source.starts_with("https://") || source.starts_with("http://") {
            Ok(Self(source.to_string()))
        } else {
            Err(LoadError::Scheme(source.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Source of decoded raster images, keyed by locator.
///
/// The production implementation fetches over HTTP; tests substitute an
/// in-process stub so the pipeline runs without a network.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn fetch(&self, locator: &str) -> Result<RgbaImage, LoadError>;
}

/// HTTP-backed image provider.
pub struct HttpImageFetcher {
    http_client: reqwest::Client,
}

impl HttpImageFetcher {
    /// Create a fetcher with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Fetch` if the HTTP client cannot be created
    /// (e.g., TLS configuration issues).
    pub fn new(timeout: Duration) -> Result<Self, LoadError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    /// Create a fetcher with the default 30 s timeout.
    pub fn with_defaults() -> Result<Self, LoadError> {
        Self::new(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
    }
}

#[async_trait]
impl ImageProvider for HttpImageFetcher {
    async fn fetch(&self, locator: &str) -> Result<RgbaImage, LoadError> {
        let locator = ImageLocator::parse(locator)?;

        let response = self
            .http_client
            .get(locator.as_str())
            .header(reqwest::header::USER_AGENT, FETCH_USER_AGENT)
            .header(reqwest::header::ACCEPT, FETCH_ACCEPT)
            .send()
            .await
            .map_err(|e| LoadError::Fetch(format!("HTTP fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(LoadError::Fetch(format!(
                "HTTP request failed with status: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LoadError::Fetch(format!("Failed to read HTTP body: {e}")))?;

        decode_image(&bytes)
    }
}

/// Decode downloaded bytes into a normalized raster.
pub fn decode_image(data: &[u8]) -> Result<RgbaImage, LoadError> {
    let format = image::guess_format(data)
        .map_err(|e| LoadError::Decode(format!("Unrecognized image format: {e}")))?;

    let decoded = image::load(Cursor::new(data), format)
        .map_err(|e| LoadError::Decode(format!("Failed to decode image: {e}")))?;

    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(LoadError::EmptyImage {
            width: decoded.width(),
            height: decoded.height(),
        });
    }

    Ok(normalize(decoded))
}

/// Flatten any alpha onto a white matte so downstream stages can treat
/// every image as opaque.
pub fn normalize(image: DynamicImage) -> RgbaImage {
    let mut rgba = image.to_rgba8();
    for pixel in rgba.pixels_mut() {
        let alpha = pixel[3] as u16;
        if alpha < 255 {
            for channel in 0..3 {
                let value = pixel[channel] as u16;
                pixel[channel] = ((value * alpha + 255 * (255 - alpha)) / 255) as u8;
            }
            pixel[3] = 255;
        }
    }
    rgba
}

/// Fetch every locator concurrently, preserving input order.
pub async fn load_all(
    provider: &dyn ImageProvider,
    locators: &[String],
) -> Vec<Result<RgbaImage, LoadError>> {
    let fetches = locators.iter().map(|locator| provider.fetch(locator));
    futures::future::join_all(fetches).await
}

/// Fetch every locator and keep only the images that loaded, logging and
/// dropping the failures.
pub async fn load_usable(provider: &dyn ImageProvider, locators: &[String]) -> Vec<RgbaImage> {
    let mut images = Vec::with_capacity(locators.len());
    for (index, result) in load_all(provider, locators).await.into_iter().enumerate() {
        match result {
            Ok(image) => images.push(image),
            Err(error) => {
                tracing::warn!(
                    index = index,
                    locator = %locators[index],
                    error = %error,
                    "Skipping image that failed to load"
                );
            }
        }
    }
    images
}
