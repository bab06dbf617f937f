//! Classification of image locations: remote URL, inline data URL, or a
//! path under the asset root.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::{Component, Path, PathBuf};

use super::LoadError;

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// `http://` or `https://` URL
    Remote(String),
    /// Decoded payload of a `data:` URL
    Inline(Vec<u8>),
    /// Local file, already resolved against the asset root
    File(PathBuf),
}

impl ImageSource {
    /// Classify `location`, resolving local paths against `asset_root`.
    pub fn parse(location: &str, asset_root: &Path) -> Result<Self, LoadError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(LoadError::Unsupported("empty image location".to_string()));
        }

        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(ImageSource::Remote(location.to_string()));
        }
        if lower.starts_with("data:") {
            return decode_data_url(location).map(ImageSource::Inline);
        }
        if let Some(path) = location.strip_prefix("file://") {
            // Absolute paths are only honored inside the asset root
            let relative = Path::new(path).strip_prefix(asset_root).map_err(|_| {
                LoadError::Unsupported(format!("path outside asset root: {}", location))
            })?;
            return contained(asset_root, relative, location);
        }
        if lower.contains("://") {
            return Err(LoadError::Unsupported(format!(
                "unsupported URL scheme in {}",
                location
            )));
        }

        contained(asset_root, Path::new(location.trim_start_matches('/')), location)
    }
}

/// Join `relative` onto `asset_root`, rejecting anything that could climb out.
fn contained(asset_root: &Path, relative: &Path, location: &str) -> Result<ImageSource, LoadError> {
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(LoadError::Unsupported(format!(
            "path escapes asset root: {}",
            location
        )));
    }
    Ok(ImageSource::File(asset_root.join(relative)))
}

/// Decode a base64 `data:` URL into raw bytes.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, LoadError> {
    let rest = url
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &url[5..])
        .ok_or_else(|| LoadError::Unsupported("not a data URL".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::Decode("data URL has no payload".to_string()))?;

    if !header.to_ascii_lowercase().ends_with(";base64") {
        return Err(LoadError::Unsupported(
            "only base64 data URLs are supported".to_string(),
        ));
    }

    BASE64
        .decode(payload.trim())
        .map_err(|e| LoadError::Decode(format!("invalid base64 in data URL: {}", e)))
}
