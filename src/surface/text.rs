//! Bitmap text rendering for flyer titles and captions.
//!
//! Uses the Spleen 12x24 bitmap font, scaled by integer factors with
//! nearest-neighbor sampling. Bold is a one-step horizontal double strike.

use image::Rgba;
use spleen_font::{FONT_12X24, PSF2Font};

/// Glyph cell width in font pixels.
pub const GLYPH_WIDTH: u32 = 12;
/// Glyph cell height in font pixels.
pub const GLYPH_HEIGHT: u32 = 24;
/// Row of the alphabetic baseline within the glyph cell.
pub const BASELINE_ROW: u32 = 19;

/// How a run of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Integer scale factor (1 = 24px line height)
    pub scale: u32,
    pub bold: bool,
    pub color: Rgba<u8>,
}

impl TextStyle {
    pub fn new(scale: u32, color: Rgba<u8>) -> Self {
        Self {
            scale: scale.max(1),
            bold: false,
            color,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Pixel height of one line at this scale.
    pub fn line_height(&self) -> u32 {
        GLYPH_HEIGHT * self.scale
    }
}

/// Screen-space box covered by a drawn text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Advance width of `text` at `scale`.
pub fn measure(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_WIDTH * scale.max(1)
}

/// Largest scale in `1..=preferred` at which `text` fits in `max_width`.
pub fn fit_scale(text: &str, preferred: u32, max_width: u32) -> u32 {
    let mut scale = preferred.max(1);
    while scale > 1 && measure(text, scale) > max_width {
        scale -= 1;
    }
    scale
}

/// Rasterize `text` into a row-major coverage mask of
/// `measure(text, 1) × GLYPH_HEIGHT` font pixels (unscaled).
pub(crate) fn rasterize(text: &str) -> Vec<bool> {
    let chars: Vec<char> = text.chars().collect();
    let row_width = chars.len() * GLYPH_WIDTH as usize;
    let mut mask = vec![false; row_width * GLYPH_HEIGHT as usize];

    let mut font = match PSF2Font::new(FONT_12X24) {
        Ok(font) => Some(font),
        Err(_) => {
            tracing::error!("Spleen 12x24 font failed to load; drawing placeholder glyphs");
            None
        }
    };

    for (i, ch) in chars.iter().enumerate() {
        let origin = i * GLYPH_WIDTH as usize;
        let utf8 = ch.to_string();

        let found = match font.as_mut() {
            Some(font) => match font.glyph_for_utf8(utf8.as_bytes()) {
                Some(glyph) => {
                    for (row_y, row) in glyph.enumerate() {
                        for (col_x, on) in row.enumerate() {
                            if on && col_x < GLYPH_WIDTH as usize && row_y < GLYPH_HEIGHT as usize {
                                mask[row_y * row_width + origin + col_x] = true;
                            }
                        }
                    }
                    true
                }
                None => false,
            },
            None => false,
        };

        if !found && !ch.is_whitespace() {
            draw_box(&mut mask, row_width, origin);
        }
    }

    mask
}

/// Outline box for characters the font does not cover.
fn draw_box(mask: &mut [bool], row_width: usize, origin: usize) {
    let (left, right) = (origin + 1, origin + GLYPH_WIDTH as usize - 2);
    let (top, bottom) = (4usize, BASELINE_ROW as usize);
    for x in left..=right {
        mask[top * row_width + x] = true;
        mask[bottom * row_width + x] = true;
    }
    for y in top..=bottom {
        mask[y * row_width + left] = true;
        mask[y * row_width + right] = true;
    }
}
