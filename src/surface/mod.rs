//! # Raster Surface
//!
//! A fixed-size RGBA pixel buffer with the handful of drawing primitives the
//! flyer needs: rectangle fill, translucent rectangle blend, stretched image
//! draw and bitmap text.
//!
//! The surface is always opaque. Coordinates are signed so callers can
//! position content partially off-canvas; everything is clipped.

pub mod text;

use image::{DynamicImage, Rgba, RgbaImage, imageops::FilterType};

use crate::error::FlyerError;
pub use text::{TextBounds, TextStyle};

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 8192;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Blend one channel of `fg` over `bg` at `percent` opacity (0-100).
///
/// Integer arithmetic with round-half-up, so results are exact and
/// platform independent.
#[inline]
pub fn blend_percent(bg: u8, fg: u8, percent: u8) -> u8 {
    let p = percent.min(100) as u32;
    ((fg as u32 * p + bg as u32 * (100 - p) + 50) / 100) as u8
}

/// Blend one channel of `fg` over `bg` with an 8-bit alpha.
#[inline]
fn blend_alpha(bg: u8, fg: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
}

/// Mutable pixel buffer owned by one composition.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Allocate a surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Result<Self, FlyerError> {
        if width == 0 || height == 0 {
            return Err(FlyerError::InvalidRequest(format!(
                "surface dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(FlyerError::InvalidRequest(format!(
                "surface {}x{} exceeds maximum dimension {}",
                width, height, MAX_DIMENSION
            )));
        }

        let background = Rgba([background[0], background[1], background[2], 255]);
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, background),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at (x, y). Panics when out of bounds, like `RgbaImage::get_pixel`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Clip a rectangle to the surface, returning `(x0, y0, x1, y1)` exclusive.
    fn clip(&self, x: i64, y: i64, w: u32, h: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w as i64).min(self.width() as i64);
        let y1 = (y + h as i64).min(self.height() as i64);
        if x0 >= x1 || y0 >= y1 {
            None
        } else {
            Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
        }
    }

    /// Fill a rectangle with an opaque color.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgba<u8>) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };
        let color = Rgba([color[0], color[1], color[2], 255]);
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px, py, color);
            }
        }
    }

    /// Paint `color` over a rectangle at `percent` opacity.
    pub fn blend_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgba<u8>, percent: u8) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                let bg = self.image.get_pixel_mut(px, py);
                for c in 0..3 {
                    bg[c] = blend_percent(bg[c], color[c], percent);
                }
            }
        }
    }

    /// Draw `source` stretched to `w × h` at (x, y), alpha-compositing over
    /// the existing content.
    pub fn draw_image(&mut self, source: &DynamicImage, x: i64, y: i64, w: u32, h: u32) {
        if w == 0 || h == 0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };

        let rgba = source.to_rgba8();
        let scaled = if rgba.dimensions() == (w, h) {
            rgba
        } else {
            image::imageops::resize(&rgba, w, h, FilterType::Triangle)
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let sx = (px as i64 - x) as u32;
                let sy = (py as i64 - y) as u32;
                let fg = scaled.get_pixel(sx, sy);
                let alpha = fg[3];
                if alpha == 0 {
                    continue;
                }
                let bg = self.image.get_pixel_mut(px, py);
                for c in 0..3 {
                    bg[c] = blend_alpha(bg[c], fg[c], alpha);
                }
            }
        }
    }

    /// Draw `content` horizontally centered on `center_x` with its
    /// alphabetic baseline at `baseline_y`.
    pub fn draw_text_centered(
        &mut self,
        content: &str,
        center_x: i64,
        baseline_y: i64,
        style: TextStyle,
    ) -> TextBounds {
        let scale = style.scale.max(1);
        let strike = if style.bold { scale as i64 } else { 0 };
        // Bold ink extends one scaled font pixel past the last glyph cell
        let width = text::measure(content, scale) + if content.is_empty() { 0 } else { strike as u32 };
        let bounds = TextBounds {
            x: center_x - width as i64 / 2,
            y: baseline_y - (text::BASELINE_ROW * scale) as i64,
            width,
            height: style.line_height(),
        };
        if content.is_empty() {
            return bounds;
        }

        let mask = text::rasterize(content);
        let mask_width = text::measure(content, 1) as usize;
        let color = Rgba([style.color[0], style.color[1], style.color[2], 255]);

        for (i, &on) in mask.iter().enumerate() {
            if !on {
                continue;
            }
            let fx = (i % mask_width) as i64;
            let fy = (i / mask_width) as i64;
            let x = bounds.x + fx * scale as i64;
            let y = bounds.y + fy * scale as i64;
            self.fill_rect(x, y, scale, scale, color);
            if strike > 0 {
                // Double strike: widen each stroke by one scaled font pixel
                self.fill_rect(x + strike, y, scale, scale, color);
            }
        }

        bounds
    }
}
