//! Flyer geometry.
//!
//! The reference flyer is 800×1200:
//!
//! ```text
//! y=150   title baseline (bold, 48px)
//! y=200   logo top, 150px square, centered
//! y=450   QR top, 300px square, centered on the midpoint
//! y=800   caption baseline (24px)
//! ```
//!
//! Other sizes keep the same proportions: vertical positions scale with
//! height, element sizes scale with `min(width / 800, height / 1200)`.

/// Reference canvas width.
pub const REFERENCE_WIDTH: u32 = 800;
/// Reference canvas height.
pub const REFERENCE_HEIGHT: u32 = 1200;

const TITLE_SCALE: f64 = 2.0;
const CAPTION_SCALE: f64 = 1.0;
const LOGO_SIZE: f64 = 150.0;
const QR_SIZE: f64 = 300.0;

/// Modules of quiet zone around the flyer QR code.
pub const QR_MARGIN_MODULES: u32 = 1;

/// An axis-aligned square on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    pub x: i64,
    pub y: i64,
    pub size: u32,
}

impl Square {
    fn centered_x(width: u32, y: i64, size: u32) -> Self {
        Self {
            x: width as i64 / 2 - size as i64 / 2,
            y,
            size,
        }
    }

    /// Whether pixel (x, y) falls inside the square.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x && x < self.x + self.size as i64 && y >= self.y && y < self.y + self.size as i64
    }
}

/// Resolved positions for one flyer size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub center_x: i64,
    pub title_baseline: i64,
    pub title_scale: u32,
    /// Horizontal space the title may occupy before it is shrunk
    pub title_max_width: u32,
    pub logo: Square,
    pub qr: Square,
    pub caption_baseline: i64,
    pub caption_scale: u32,
}

impl Layout {
    pub fn for_size(width: u32, height: u32) -> Self {
        let s = (width as f64 / REFERENCE_WIDTH as f64).min(height as f64 / REFERENCE_HEIGHT as f64);
        let h = height as f64;
        let scaled = |v: f64| ((v * s).round() as u32).max(1);

        let logo_size = scaled(LOGO_SIZE);
        let qr_size = scaled(QR_SIZE);
        let mid = height as i64 / 2;
        let sixth = (h / 6.0).round() as i64;

        Self {
            width,
            height,
            center_x: width as i64 / 2,
            title_baseline: (h * 0.125).round() as i64,
            title_scale: scaled(TITLE_SCALE),
            title_max_width: width - width / 10,
            logo: Square::centered_x(width, sixth, logo_size),
            qr: Square::centered_x(width, mid - qr_size as i64 / 2, qr_size),
            caption_baseline: mid + sixth,
            caption_scale: scaled(CAPTION_SCALE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reference_layout_matches_fixed_offsets() {
        let layout = Layout::for_size(800, 1200);
        assert_eq!(layout.title_baseline, 150);
        assert_eq!(layout.title_scale, 2);
        assert_eq!(layout.logo, Square { x: 325, y: 200, size: 150 });
        assert_eq!(layout.qr, Square { x: 250, y: 450, size: 300 });
        assert_eq!(layout.caption_baseline, 800);
        assert_eq!(layout.caption_scale, 1);
    }

    #[test]
    fn test_double_size_scales_everything() {
        let layout = Layout::for_size(1600, 2400);
        assert_eq!(layout.title_baseline, 300);
        assert_eq!(layout.title_scale, 4);
        assert_eq!(layout.logo, Square { x: 650, y: 400, size: 300 });
        assert_eq!(layout.qr, Square { x: 500, y: 900, size: 600 });
        assert_eq!(layout.caption_baseline, 1600);
        assert_eq!(layout.caption_scale, 2);
    }

    #[test]
    fn test_landscape_uses_limiting_axis() {
        // Height-limited: s = 600 / 1200 = 0.5
        let layout = Layout::for_size(1200, 600);
        assert_eq!(layout.qr.size, 150);
        assert_eq!(layout.qr.x, 600 - 75);
        assert_eq!(layout.qr.y, 300 - 75);
        assert_eq!(layout.logo.size, 75);
    }

    #[test]
    fn test_tiny_surface_keeps_minimums() {
        let layout = Layout::for_size(8, 12);
        assert!(layout.qr.size >= 1);
        assert!(layout.title_scale >= 1);
        assert!(layout.caption_scale >= 1);
    }

    #[test]
    fn test_square_contains() {
        let sq = Square { x: 10, y: 20, size: 5 };
        assert!(sq.contains(10, 20));
        assert!(sq.contains(14, 24));
        assert!(!sq.contains(15, 24));
        assert!(!sq.contains(9, 20));
    }
}
