//! # Image Loading
//!
//! The compositor never fetches or decodes images itself; it asks an
//! [`ImageLoader`]. Two implementations ship with the crate:
//!
//! - [`UrlImageLoader`]: remote `http(s)` URLs, `data:` URLs and files under
//!   an asset root (site-relative paths such as `/backgrounds/marble.jpg`).
//! - [`StaticImageLoader`]: a fixed in-memory map, for tests and offline use.
//!
//! Load failures are ordinary values of [`LoadError`]; the compositor decides
//! whether they matter.

mod http;
mod source;

pub use http::UrlImageLoader;
pub use source::{ImageSource, decode_data_url};

use async_trait::async_trait;
use image::DynamicImage;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Why an image could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("image load timed out after {0:?}")]
    Timeout(Duration),

    #[error("unsupported image source: {0}")]
    Unsupported(String),

    #[error("image not found: {0}")]
    NotFound(String),

    #[error("failed to read image file: {0}")]
    Io(String),
}

/// Resolves an image location to decoded pixels.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, location: &str) -> Result<DynamicImage, LoadError>;
}

/// Decode encoded image bytes (PNG, JPEG, ...).
pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage, LoadError> {
    image::load_from_memory(bytes).map_err(|e| LoadError::Decode(e.to_string()))
}

/// Decode `bytes` on the blocking thread pool.
///
/// Awaiting this yields to the runtime, so a surrounding
/// `tokio::time::timeout` can fire while a large image is still decoding.
pub async fn decode_bytes_blocking(bytes: Vec<u8>) -> Result<DynamicImage, LoadError> {
    tokio::task::spawn_blocking(move || decode_bytes(&bytes))
        .await
        .map_err(|e| LoadError::Decode(format!("decode task failed: {}", e)))?
}

/// Loader backed by a fixed set of pre-decoded images.
#[derive(Debug, Clone, Default)]
pub struct StaticImageLoader {
    images: HashMap<String, DynamicImage>,
}

impl StaticImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `image` under `location`.
    pub fn with(mut self, location: impl Into<String>, image: DynamicImage) -> Self {
        self.images.insert(location.into(), image);
        self
    }

    pub fn insert(&mut self, location: impl Into<String>, image: DynamicImage) {
        self.images.insert(location.into(), image);
    }
}

#[async_trait]
impl ImageLoader for StaticImageLoader {
    async fn load(&self, location: &str) -> Result<DynamicImage, LoadError> {
        self.images
            .get(location)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(location.to_string()))
    }
}
