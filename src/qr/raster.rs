//! Module grid to bitmap conversion, plus the standalone QR image used for
//! menu previews and downloads.

use image::{GrayImage, ImageFormat, Luma};
use std::io::Cursor;

use super::{EcLevel, QrSymbol, encode};
use crate::error::FlyerError;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

impl QrSymbol {
    /// Rasterize into a `size × size` bitmap with a `margin`-module quiet zone.
    ///
    /// Modules map to pixels by integer division, so each module is either
    /// `floor` or `ceil` of `size / total` pixels wide. Returns `None` when
    /// `size` is smaller than the total module count.
    pub fn rasterize(&self, size: u32, margin: u32) -> Option<GrayImage> {
        let total = self.width as u32 + 2 * margin;
        if size < total {
            return None;
        }

        let module_at = |p: u32| -> Option<usize> {
            let m = (p as u64 * total as u64 / size as u64) as u32;
            if m < margin || m >= margin + self.width as u32 {
                None
            } else {
                Some((m - margin) as usize)
            }
        };

        let mut img = GrayImage::from_pixel(size, size, LIGHT);
        for py in 0..size {
            let Some(my) = module_at(py) else { continue };
            for px in 0..size {
                if let Some(mx) = module_at(px) {
                    if self.is_dark(mx, my) {
                        img.put_pixel(px, py, DARK);
                    }
                }
            }
        }

        Some(img)
    }
}

/// Options for a standalone QR image.
#[derive(Debug, Clone, Copy)]
pub struct QrImageOptions {
    /// Output width and height in pixels
    pub size: u32,
    /// Quiet zone in modules
    pub margin: u32,
    pub level: EcLevel,
}

impl Default for QrImageOptions {
    fn default() -> Self {
        Self {
            size: 200,
            margin: 1,
            level: EcLevel::H,
        }
    }
}

/// Render `payload` as a PNG QR image (black on white).
pub fn render_png(payload: &str, options: QrImageOptions) -> Result<Vec<u8>, FlyerError> {
    let symbol = encode(payload, options.level)?;
    let bitmap = symbol.rasterize(options.size, options.margin).ok_or_else(|| {
        FlyerError::Composition(format!(
            "{}px is too small for a {}-module symbol",
            options.size,
            symbol.width() + 2 * options.margin as usize
        ))
    })?;

    let mut png_bytes = Vec::new();
    bitmap
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| FlyerError::Serialization(format!("PNG encoding failed: {}", e)))?;
    Ok(png_bytes)
}
