//! # Flyer Compositor
//!
//! Builds a printable menu flyer from a [`FlyerRequest`]:
//!
//! ```text
//! FlyerRequest ─► encode QR (level H) ──fatal on error──┐
//!              └► load background ┐                      │
//!              └► load logo ──────┴─ degrade on error    │
//!                                                        ▼
//!   fill #f8f9fa → background → 70% white → title → logo → QR → caption
//!                                                        │
//!                                                        ▼
//!                                                   Composition
//! ```
//!
//! Background and logo are fetched concurrently, each bounded by the
//! compositor's load timeout. A failed or timed-out background leaves the
//! flat fill; a failed logo is omitted. Both outcomes are reported in
//! [`Composition`] so callers can tell which path was taken. Only QR and
//! request problems abort the composite.
//!
//! ## Example
//!
//! ```no_run
//! use menuflyer::flyer::{Compositor, FlyerRequest};
//! use menuflyer::loader::StaticImageLoader;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), menuflyer::FlyerError> {
//! let compositor = Compositor::new(Arc::new(StaticImageLoader::new()));
//! let request = FlyerRequest::new("Joe's Diner", "https://onourmenu.app/menu/abc123");
//! let composition = compositor.composite(&request).await?;
//! let png = composition.to_buffer()?;
//! # Ok(())
//! # }
//! ```

pub mod layout;

pub use layout::{Layout, Square};

use image::{DynamicImage, GrayImage, Rgba};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::DEFAULT_LOAD_TIMEOUT;
use crate::error::FlyerError;
use crate::loader::{ImageLoader, LoadError};
use crate::output::{self, CompositedFlyer, OutputFormat};
use crate::qr::{self, EcLevel};
use crate::surface::{BLACK, RasterSurface, TextStyle, WHITE, text};

/// Flat fill used when no background image is drawn.
pub const FALLBACK_FILL: Rgba<u8> = Rgba([0xf8, 0xf9, 0xfa, 255]);
/// Opacity of the white readability overlay, in percent.
pub const OVERLAY_OPACITY: u8 = 70;
/// Caption printed under the QR code.
pub const CAPTION: &str = "Scan to view our menu";
/// Error-correction level for flyer QR codes.
pub const QR_LEVEL: EcLevel = EcLevel::H;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 1200;

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

/// Everything needed to draw one flyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyerRequest {
    pub restaurant_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub background_url: Option<String>,
    /// Text encoded into the QR symbol, usually the public menu URL
    #[serde(alias = "qrCodeUrl")]
    pub qr_payload_url: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl FlyerRequest {
    /// A default-sized request with no images.
    pub fn new(restaurant_name: impl Into<String>, qr_payload_url: impl Into<String>) -> Self {
        Self {
            restaurant_name: restaurant_name.into(),
            logo_url: None,
            background_url: None,
            qr_payload_url: qr_payload_url.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }

    pub fn logo(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }

    pub fn background(mut self, url: impl Into<String>) -> Self {
        self.background_url = Some(url.into());
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Logo location, treating blank strings as absent.
    pub fn logo_location(&self) -> Option<&str> {
        non_blank(&self.logo_url)
    }

    /// Background location, treating blank strings as absent.
    pub fn background_location(&self) -> Option<&str> {
        non_blank(&self.background_url)
    }

    /// Check the fields that make a request unusable before any work starts.
    /// The QR payload is left to the encoder, which owns its own rules.
    pub fn validate(&self) -> Result<(), FlyerError> {
        if self.restaurant_name.trim().is_empty() {
            return Err(FlyerError::InvalidRequest(
                "restaurant name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// What happened to an optional image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    /// No location was given
    NotRequested,
    /// Loaded and drawn
    Loaded,
    /// Load failed; the fallback was used (fill for background, omission for logo)
    Failed(LoadError),
}

impl AssetStatus {
    /// Short label used in API responses.
    pub fn label(&self) -> &'static str {
        match self {
            AssetStatus::NotRequested => "none",
            AssetStatus::Loaded => "loaded",
            AssetStatus::Failed(_) => "fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AssetStatus::Failed(_))
    }
}

/// A drawn flyer plus a report of how it was drawn.
#[derive(Debug, Clone)]
pub struct Composition {
    pub surface: RasterSurface,
    pub layout: Layout,
    pub background: AssetStatus,
    pub logo: AssetStatus,
}

impl Composition {
    /// PNG bytes for download.
    pub fn to_buffer(&self) -> Result<Vec<u8>, FlyerError> {
        output::to_buffer(&self.surface)
    }

    /// PNG data URL for inline preview.
    pub fn to_data_url(&self) -> Result<String, FlyerError> {
        output::to_data_url(&self.surface)
    }
}

/// Draws flyers. Stateless between calls; share freely behind an `Arc`.
#[derive(Clone)]
pub struct Compositor {
    loader: Arc<dyn ImageLoader>,
    load_timeout: Duration,
}

impl Compositor {
    pub fn new(loader: Arc<dyn ImageLoader>) -> Self {
        Self {
            loader,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    /// Bound each image load. A timeout is handled like any other load failure.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    pub fn load_timeout(&self) -> Duration {
        self.load_timeout
    }

    /// Composite `request` onto a fresh surface.
    ///
    /// Dropping the returned future abandons any in-flight image loads.
    pub async fn composite(&self, request: &FlyerRequest) -> Result<Composition, FlyerError> {
        request.validate()?;
        let surface = RasterSurface::new(request.width, request.height, FALLBACK_FILL)?;
        let layout = Layout::for_size(request.width, request.height);

        // QR first: without a scannable code there is nothing worth loading images for
        let symbol = qr::encode(&request.qr_payload_url, QR_LEVEL)?;
        let qr_bitmap = symbol
            .rasterize(layout.qr.size, layout::QR_MARGIN_MODULES)
            .ok_or_else(|| {
                FlyerError::Composition(format!(
                    "{}px QR area cannot hold {} modules",
                    layout.qr.size,
                    symbol.width() as u32 + 2 * layout::QR_MARGIN_MODULES
                ))
            })?;
        debug!(
            version = symbol.version(),
            modules = symbol.width(),
            size = layout.qr.size,
            "encoded flyer QR code"
        );

        let ((background_image, background), (logo_image, logo)) = tokio::join!(
            self.load_optional("background", request.background_location()),
            self.load_optional("logo", request.logo_location()),
        );

        let name = request.restaurant_name.trim().to_string();
        let surface = tokio::task::spawn_blocking(move || {
            draw_layers(surface, &layout, background_image, logo_image, qr_bitmap, &name)
        })
        .await
        .map_err(|e| FlyerError::Composition(format!("draw task failed: {}", e)))?;

        Ok(Composition {
            surface,
            layout,
            background,
            logo,
        })
    }

    /// Composite and serialize in one step.
    pub async fn render(
        &self,
        request: &FlyerRequest,
        format: OutputFormat,
    ) -> Result<CompositedFlyer, FlyerError> {
        let composition = self.composite(request).await?;
        tokio::task::spawn_blocking(move || output::serialize(&composition.surface, format))
            .await
            .map_err(|e| FlyerError::Serialization(format!("encode task failed: {}", e)))?
    }

    async fn load_optional(
        &self,
        role: &'static str,
        location: Option<&str>,
    ) -> (Option<DynamicImage>, AssetStatus) {
        let Some(location) = location else {
            return (None, AssetStatus::NotRequested);
        };

        let result = match tokio::time::timeout(self.load_timeout, self.loader.load(location)).await {
            Ok(result) => result,
            Err(_) => Err(LoadError::Timeout(self.load_timeout)),
        };

        match result {
            Ok(image) => {
                debug!(role, location, width = image.width(), height = image.height(), "loaded image");
                (Some(image), AssetStatus::Loaded)
            }
            Err(e) => {
                warn!(role, location, error = %e, "image load failed, using fallback");
                (None, AssetStatus::Failed(e))
            }
        }
    }
}

/// Paint every layer in order. Pure CPU work; run off the async threads.
fn draw_layers(
    mut surface: RasterSurface,
    layout: &Layout,
    background: Option<DynamicImage>,
    logo: Option<DynamicImage>,
    qr_bitmap: GrayImage,
    name: &str,
) -> RasterSurface {
    let (width, height) = (surface.width(), surface.height());

    if let Some(image) = &background {
        surface.draw_image(image, 0, 0, width, height);
    }

    surface.blend_rect(0, 0, width, height, WHITE, OVERLAY_OPACITY);

    let title_scale = text::fit_scale(name, layout.title_scale, layout.title_max_width);
    surface.draw_text_centered(
        name,
        layout.center_x,
        layout.title_baseline,
        TextStyle::new(title_scale, BLACK).bold(),
    );

    if let Some(image) = &logo {
        let sq = layout.logo;
        surface.draw_image(image, sq.x, sq.y, sq.size, sq.size);
    }

    let qr_image = DynamicImage::ImageLuma8(qr_bitmap);
    surface.draw_image(&qr_image, layout.qr.x, layout.qr.y, layout.qr.size, layout.qr.size);

    surface.draw_text_centered(
        CAPTION,
        layout.center_x,
        layout.caption_baseline,
        TextStyle::new(layout.caption_scale, BLACK),
    );

    surface
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_from_json_defaults() {
        let request: FlyerRequest = serde_json::from_str(
            r#"{"restaurantName": "Joe's Diner", "qrPayloadUrl": "https://onourmenu.app/menu/abc123"}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            FlyerRequest::new("Joe's Diner", "https://onourmenu.app/menu/abc123")
        );
    }

    #[test]
    fn test_request_from_json_full() {
        let request: FlyerRequest = serde_json::from_str(
            r#"{
                "restaurantName": "Cafe",
                "logoUrl": "https://cdn.example.com/logo.png",
                "backgroundUrl": "/backgrounds/marble.jpg",
                "qrCodeUrl": "https://onourmenu.app/menu/1",
                "width": 400,
                "height": 600
            }"#,
        )
        .unwrap();
        assert_eq!(
            request,
            FlyerRequest::new("Cafe", "https://onourmenu.app/menu/1")
                .logo("https://cdn.example.com/logo.png")
                .background("/backgrounds/marble.jpg")
                .size(400, 600)
        );
    }

    #[test]
    fn test_blank_locations_are_absent() {
        let request = FlyerRequest::new("Cafe", "x").logo("  ").background("");
        assert_eq!(request.logo_location(), None);
        assert_eq!(request.background_location(), None);

        let request = FlyerRequest::new("Cafe", "x").logo(" /logo.png ");
        assert_eq!(request.logo_location(), Some("/logo.png"));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(matches!(
            FlyerRequest::new("   ", "x").validate(),
            Err(FlyerError::InvalidRequest(_))
        ));
        assert!(FlyerRequest::new("Cafe", "x").validate().is_ok());
    }

    #[test]
    fn test_asset_status_labels() {
        assert_eq!(AssetStatus::NotRequested.label(), "none");
        assert_eq!(AssetStatus::Loaded.label(), "loaded");
        let failed = AssetStatus::Failed(LoadError::NotFound("x".to_string()));
        assert_eq!(failed.label(), "fallback");
        assert!(failed.is_fallback());
        assert!(!AssetStatus::Loaded.is_fallback());
    }
}
