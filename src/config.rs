//! # Configuration
//!
//! Runtime settings shared by the CLI, the server and the image loader.
//!
//! | Setting | Default | Environment |
//! |---------|---------|-------------|
//! | `base_url` | `https://onourmenu.app` | `FLYER_BASE_URL` |
//! | `asset_root` | `public` | `FLYER_ASSET_ROOT` |
//! | `load_timeout` | 8 s | `FLYER_LOAD_TIMEOUT_SECS` |
//!
//! The binary maps these onto `clap` arguments; library users construct
//! [`FlyerConfig`] directly.

use std::path::PathBuf;
use std::time::Duration;

/// Public site root used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://onourmenu.app";

/// Default bound on a single image fetch + decode.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(8);

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct FlyerConfig {
    /// Root of public menu URLs (`{base_url}/menu/{id}`)
    pub base_url: String,
    /// Directory that site-relative image paths resolve against
    pub asset_root: PathBuf,
    /// Timeout for each background/logo load
    pub load_timeout: Duration,
    /// User-Agent sent when fetching remote images
    pub user_agent: String,
}

impl Default for FlyerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            asset_root: PathBuf::from("public"),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            user_agent: format!("menuflyer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FlyerConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = root.into();
        self
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FlyerConfig::default();
        assert_eq!(config.base_url, "https://onourmenu.app");
        assert_eq!(config.asset_root, PathBuf::from("public"));
        assert_eq!(config.load_timeout, Duration::from_secs(8));
        assert!(config.user_agent.starts_with("menuflyer/"));
    }

    #[test]
    fn test_builders() {
        let config = FlyerConfig::default()
            .with_base_url("http://localhost:3000")
            .with_asset_root("/srv/site")
            .with_load_timeout(Duration::from_millis(500));
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.asset_root, PathBuf::from("/srv/site"));
        assert_eq!(config.load_timeout, Duration::from_millis(500));
    }
}
