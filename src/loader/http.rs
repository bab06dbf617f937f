//! URL-based loader: remote fetches through a shared `reqwest::Client`,
//! inline data URLs, and files under the asset root.

use async_trait::async_trait;
use image::DynamicImage;
use std::path::PathBuf;

use super::{ImageLoader, ImageSource, LoadError, decode_bytes_blocking};
use crate::config::FlyerConfig;
use crate::error::FlyerError;

/// Largest remote response body accepted, in bytes.
pub const MAX_REMOTE_BYTES: usize = 20 * 1024 * 1024;

/// Loads images from `http(s)://`, `data:` and local locations.
#[derive(Debug, Clone)]
pub struct UrlImageLoader {
    http_client: reqwest::Client,
    asset_root: PathBuf,
    max_bytes: usize,
}

impl UrlImageLoader {
    pub fn new(http_client: reqwest::Client, asset_root: impl Into<PathBuf>) -> Self {
        Self {
            http_client,
            asset_root: asset_root.into(),
            max_bytes: MAX_REMOTE_BYTES,
        }
    }

    /// Cap on remote response bodies (default [`MAX_REMOTE_BYTES`]).
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Build a loader with its own HTTP client from `config`.
    pub fn from_config(config: &FlyerConfig) -> Result<Self, FlyerError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.load_timeout)
            .build()
            .map_err(|e| FlyerError::Server(format!("HTTP client error: {}", e)))?;
        Ok(Self::new(http_client, config.asset_root.clone()))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let fetch_error = |reason: String| LoadError::Fetch {
            url: url.to_string(),
            reason,
        };
        let too_large = || fetch_error(format!("response body exceeds {} bytes", self.max_bytes));

        let mut response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            return Err(too_large());
        }

        // Content-Length may be absent or compressed; count what actually arrives
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| fetch_error(e.to_string()))? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait]
impl ImageLoader for UrlImageLoader {
    async fn load(&self, location: &str) -> Result<DynamicImage, LoadError> {
        let bytes = match ImageSource::parse(location, &self.asset_root)? {
            ImageSource::Remote(url) => self.fetch(&url).await?,
            ImageSource::Inline(bytes) => bytes,
            ImageSource::File(path) => tokio::fs::read(&path).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    LoadError::NotFound(path.display().to_string())
                } else {
                    LoadError::Io(format!("{}: {}", path.display(), e))
                }
            })?,
        };
        decode_bytes_blocking(bytes).await
    }
}
