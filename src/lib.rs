//! # Menuflyer - QR Code Flyers for Restaurant Menus
//!
//! Menuflyer renders printable flyers that send diners to a restaurant's
//! digital menu. It provides:
//!
//! - **QR encoding**: module grids at any error-correction level (flyers use H)
//! - **Compositing**: background, readability overlay, name, logo, QR, caption
//! - **Serialization**: PNG bytes for download, data URLs for preview
//! - **Image loading**: remote, inline and local images behind one trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use menuflyer::{
//!     config::FlyerConfig,
//!     flyer::{Compositor, FlyerRequest},
//!     loader::UrlImageLoader,
//!     menu,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), menuflyer::FlyerError> {
//! let config = FlyerConfig::default();
//! let loader = UrlImageLoader::from_config(&config)?;
//! let compositor = Compositor::new(Arc::new(loader)).with_load_timeout(config.load_timeout);
//!
//! let request = FlyerRequest::new("Joe's Diner", menu::menu_url(&config.base_url, "abc123"))
//!     .background("/backgrounds/marble.jpg");
//!
//! let composition = compositor.composite(&request).await?;
//! std::fs::write(menu::download_filename("Joe's Diner"), composition.to_buffer()?)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`qr`] | QR symbol encoding and rasterization |
//! | [`flyer`] | Flyer requests, layout and the compositor |
//! | [`surface`] | Pixel buffer and drawing primitives |
//! | [`output`] | PNG / data URL serialization |
//! | [`loader`] | Image loading collaborators |
//! | [`menu`] | Menu URLs and download filenames |
//! | [`backgrounds`] | Built-in background presets |
//! | [`server`] | HTTP API |
//! | [`config`] | Runtime settings |
//! | [`error`] | Error types |

pub mod backgrounds;
pub mod config;
pub mod error;
pub mod flyer;
pub mod loader;
pub mod menu;
pub mod output;
pub mod qr;
pub mod server;
pub mod surface;

// Re-exports for convenience
pub use error::FlyerError;
pub use flyer::{Composition, Compositor, FlyerRequest};
pub use output::{CompositedFlyer, OutputFormat};
