//! # Output Serializer
//!
//! Encodes a finished [`RasterSurface`] as PNG. Two views of the same bytes
//! are offered: a raw buffer for downloads and a base64 data URL for inline
//! previews. The data URL always embeds exactly the buffer bytes, so both
//! decode to identical pixels.
//!
//! ```text
//! RasterSurface ──PNG──► Vec<u8> ──────────────► CompositedFlyer::Png
//!                           └──base64──► "data:image/png;base64,…" ► CompositedFlyer::DataUrl
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageFormat;
use std::io::Cursor;

use crate::error::FlyerError;
use crate::surface::RasterSurface;

/// Prefix of every data URL produced here.
pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Requested transport representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    DataUrl,
    Png,
}

/// A serialized flyer. Ownership passes to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositedFlyer {
    DataUrl(String),
    Png(Vec<u8>),
}

impl CompositedFlyer {
    /// Raw PNG bytes regardless of representation.
    pub fn png_bytes(&self) -> Result<Vec<u8>, FlyerError> {
        match self {
            CompositedFlyer::Png(bytes) => Ok(bytes.clone()),
            CompositedFlyer::DataUrl(url) => url
                .strip_prefix(DATA_URL_PREFIX)
                .ok_or_else(|| FlyerError::Serialization("not a PNG data URL".to_string()))
                .and_then(|payload| {
                    BASE64
                        .decode(payload)
                        .map_err(|e| FlyerError::Serialization(format!("invalid base64: {}", e)))
                }),
        }
    }
}

/// Encode the surface as PNG bytes.
pub fn to_buffer(surface: &RasterSurface) -> Result<Vec<u8>, FlyerError> {
    let mut png_bytes = Vec::new();
    surface
        .as_image()
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| FlyerError::Serialization(format!("PNG encoding failed: {}", e)))?;
    Ok(png_bytes)
}

/// Encode the surface as a `data:image/png;base64,` URL.
pub fn to_data_url(surface: &RasterSurface) -> Result<String, FlyerError> {
    let png_bytes = to_buffer(surface)?;
    Ok(format!("{}{}", DATA_URL_PREFIX, BASE64.encode(png_bytes)))
}

/// Encode the surface in the requested representation.
pub fn serialize(surface: &RasterSurface, format: OutputFormat) -> Result<CompositedFlyer, FlyerError> {
    match format {
        OutputFormat::DataUrl => to_data_url(surface).map(CompositedFlyer::DataUrl),
        OutputFormat::Png => to_buffer(surface).map(CompositedFlyer::Png),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{BLACK, WHITE};

    fn sample_surface() -> RasterSurface {
        let mut surface = RasterSurface::new(16, 24, WHITE).unwrap();
        surface.fill_rect(2, 3, 5, 7, BLACK);
        surface.blend_rect(0, 0, 16, 4, BLACK, 30);
        surface
    }

    #[test]
    fn test_buffer_is_png() {
        let bytes = to_buffer(&sample_surface()).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (16, 24));
        assert_eq!(&decoded, sample_surface().as_image());
    }

    #[test]
    fn test_data_url_embeds_buffer() {
        let surface = sample_surface();
        let url = to_data_url(&surface).unwrap();
        assert!(url.starts_with(DATA_URL_PREFIX));
        let bytes = BASE64.decode(&url[DATA_URL_PREFIX.len()..]).unwrap();
        assert_eq!(bytes, to_buffer(&surface).unwrap());
    }

    #[test]
    fn test_serialize_views_agree() {
        let surface = sample_surface();
        let png = serialize(&surface, OutputFormat::Png).unwrap();
        let url = serialize(&surface, OutputFormat::DataUrl).unwrap();
        assert!(matches!(png, CompositedFlyer::Png(_)));
        assert!(matches!(url, CompositedFlyer::DataUrl(_)));
        assert_eq!(png.png_bytes().unwrap(), url.png_bytes().unwrap());
    }

    #[test]
    fn test_png_bytes_rejects_foreign_data_url() {
        let flyer = CompositedFlyer::DataUrl("data:image/jpeg;base64,AAAA".to_string());
        assert!(matches!(flyer.png_bytes(), Err(FlyerError::Serialization(_))));
    }
}
