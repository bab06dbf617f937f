//! Server state and configuration.

use std::sync::Arc;

use crate::config::FlyerConfig;
use crate::error::FlyerError;
use crate::flyer::Compositor;
use crate::loader::UrlImageLoader;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Engine settings (base URL, asset root, load timeout)
    pub flyer: FlyerConfig,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub compositor: Compositor,
}

impl AppState {
    /// Build state with a URL loader configured from `config`.
    pub fn new(config: ServerConfig) -> Result<Self, FlyerError> {
        let loader = UrlImageLoader::from_config(&config.flyer)?;
        let compositor =
            Compositor::new(Arc::new(loader)).with_load_timeout(config.flyer.load_timeout);
        Ok(Self { config, compositor })
    }

    /// Build state around an existing compositor.
    pub fn with_compositor(config: ServerConfig, compositor: Compositor) -> Self {
        Self { config, compositor }
    }
}
