//! # Menuflyer CLI
//!
//! Command-line interface for rendering menu flyers and QR codes.
//!
//! ## Usage
//!
//! ```bash
//! # Render a flyer for a menu (writes joe's-diner-qr.png)
//! menuflyer render --name "Joe's Diner" --menu-id abc123
//!
//! # With a preset background and a remote logo
//! menuflyer render --name "Joe's Diner" --menu-id abc123 \
//!     --background bg-4 --logo https://cdn.example.com/logo.png
//!
//! # Print a data URL instead of writing a file
//! menuflyer render --name "Joe's Diner" --url https://onourmenu.app/menu/abc123 --data-url
//!
//! # Standalone QR code
//! menuflyer qr --menu-id abc123 --out menu-qr.png
//!
//! # List background presets
//! menuflyer backgrounds
//!
//! # Run the HTTP API
//! menuflyer serve --listen 0.0.0.0:8080
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use menuflyer::{
    FlyerError,
    backgrounds,
    config::{DEFAULT_BASE_URL, FlyerConfig},
    flyer::{AssetStatus, Compositor, FlyerRequest},
    loader::UrlImageLoader,
    menu,
    qr::{self, QrImageOptions},
    server::{self, ServerConfig},
};

/// Menuflyer - QR code flyers for restaurant menus
#[derive(Parser, Debug)]
#[command(name = "menuflyer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by every subcommand.
#[derive(Args, Debug)]
struct ConfigArgs {
    /// Root of public menu URLs
    #[arg(long, global = true, env = "FLYER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory that site-relative image paths resolve against
    #[arg(long, global = true, env = "FLYER_ASSET_ROOT", default_value = "public")]
    asset_root: PathBuf,

    /// Seconds to wait for each background/logo load
    #[arg(long, global = true, env = "FLYER_LOAD_TIMEOUT_SECS", default_value = "8")]
    load_timeout_secs: u64,
}

impl ConfigArgs {
    fn to_config(&self) -> FlyerConfig {
        FlyerConfig::default()
            .with_base_url(self.base_url.clone())
            .with_asset_root(self.asset_root.clone())
            .with_load_timeout(Duration::from_secs(self.load_timeout_secs.max(1)))
    }
}

/// What the QR code should point at.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Target {
    /// Menu id, expanded to {base-url}/menu/{id}
    #[arg(long)]
    menu_id: Option<String>,

    /// Full URL (or any text) to encode
    #[arg(long)]
    url: Option<String>,
}

impl Target {
    fn payload(&self, base_url: &str) -> String {
        match (&self.url, &self.menu_id) {
            (Some(url), _) => url.clone(),
            (None, Some(id)) => menu::menu_url(base_url, id),
            (None, None) => String::new(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a flyer to PNG
    Render {
        /// Restaurant name printed at the top
        #[arg(long)]
        name: String,

        #[command(flatten)]
        target: Target,

        /// Logo location (URL, data URL or path)
        #[arg(long)]
        logo: Option<String>,

        /// Background location or preset id (see `backgrounds`)
        #[arg(long)]
        background: Option<String>,

        /// Flyer width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Flyer height in pixels
        #[arg(long, default_value = "1200")]
        height: u32,

        /// Output file (defaults to a name derived from the restaurant)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Print a data URL to stdout instead of writing a file
        #[arg(long, conflicts_with = "out")]
        data_url: bool,
    },

    /// Render a standalone QR code to PNG
    Qr {
        #[command(flatten)]
        target: Target,

        /// Image size in pixels
        #[arg(long, default_value = "200")]
        size: u32,

        /// Output file
        #[arg(long, value_name = "FILE", default_value = "menu-qr.png")]
        out: PathBuf,
    },

    /// List built-in background presets
    Backgrounds,

    /// Start the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), FlyerError> {
    let cli = Cli::parse();
    let config = cli.config.to_config();

    match cli.command {
        Commands::Render {
            name,
            target,
            logo,
            background,
            width,
            height,
            out,
            data_url,
        } => {
            let mut request = FlyerRequest::new(name, target.payload(&config.base_url))
                .size(width, height);
            request.logo_url = logo;
            request.background_url = background.as_deref().map(backgrounds::resolve);

            let loader = UrlImageLoader::from_config(&config)?;
            let compositor =
                Compositor::new(Arc::new(loader)).with_load_timeout(config.load_timeout);
            let composition = compositor.composite(&request).await?;

            report_asset("background", &composition.background);
            report_asset("logo", &composition.logo);

            if data_url {
                println!("{}", composition.to_data_url()?);
            } else {
                let path = out
                    .unwrap_or_else(|| PathBuf::from(menu::download_filename(&request.restaurant_name)));
                std::fs::write(&path, composition.to_buffer()?)?;
                println!("Saved {}x{} flyer to {}", width, height, path.display());
            }
        }

        Commands::Qr { target, size, out } => {
            let payload = target.payload(&config.base_url);
            let options = QrImageOptions {
                size,
                ..QrImageOptions::default()
            };
            std::fs::write(&out, qr::render_png(&payload, options)?)?;
            println!("Saved QR code for {} to {}", payload, out.display());
        }

        Commands::Backgrounds => {
            println!("Available backgrounds:");
            for preset in backgrounds::PRESETS {
                println!("  {:<6} {:<14} {}", preset.id, preset.name, preset.path);
            }
        }

        Commands::Serve { listen } => {
            server::serve(ServerConfig {
                listen_addr: listen,
                flyer: config,
            })
            .await?;
        }
    }

    Ok(())
}

/// Tell the user when an image fell back, so a missing logo is not silent.
fn report_asset(role: &str, status: &AssetStatus) {
    if let AssetStatus::Failed(e) = status {
        eprintln!("Warning: {} not used ({})", role, e);
    }
}
