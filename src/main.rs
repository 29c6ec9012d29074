use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stead::{api, Site, SiteConfig};

#[derive(Parser)]
#[command(name = "stead")]
#[command(about = "Personal site pipeline: bundle CSS, render pages, export or serve")]
struct Cli {
    /// Optional JSON config file; defaults cover the conventional layout
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render everything at startup and serve it over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
    /// Static export: write every page to the build directory and exit
    Build {
        /// Output directory
        #[arg(short, long, default_value = "build")]
        out: PathBuf,
    },
    /// Local dev loop: export to temporary locations, serve, clean up on Ctrl-C
    Dev {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "stead=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SiteConfig> {
    match path {
        Some(p) => SiteConfig::from_file(p),
        None => Ok(SiteConfig::default()),
    }
}

async fn serve(site: Site, port: u16) -> anyhow::Result<()> {
    let app = api::create_router(Arc::new(site));
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Listening on http://127.0.0.1:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
    tracing::info!("Interrupt received. Exiting...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Some(Commands::Serve { port }) => {
            let site = Site::build(config)?;
            serve(site, port).await?;
        }
        None => {
            // Default: serve on the standard port
            let site = Site::build(config)?;
            serve(site, 8000).await?;
        }
        Some(Commands::Build { out }) => {
            let site = Site::build(config)?;
            site.export(&out)?;
        }
        Some(Commands::Dev { port }) => {
            // Everything lands in throwaway locations that are removed on
            // Ctrl-C, leaving the source tree as it was.
            let mut config = config;
            let temp_bundle = PathBuf::from("_bundle.css");
            let temp_static = PathBuf::from("_static");
            config.bundle_output = temp_bundle.clone();

            let site = Site::build(config)?;
            site.export(&temp_static)?;

            // Serve the exported files themselves, so what you see is what
            // a static host would ship.
            let app = api::create_export_router(&temp_static, site.config());
            let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
            tracing::info!("Dev server on http://127.0.0.1:{}", port);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("Cleaning up {} and {}", temp_bundle.display(), temp_static.display());
            if let Err(e) = std::fs::remove_file(&temp_bundle) {
                tracing::warn!("Failed to remove {}: {}", temp_bundle.display(), e);
            }
            if let Err(e) = std::fs::remove_dir_all(&temp_static) {
                tracing::warn!("Failed to remove {}: {}", temp_static.display(), e);
            }
        }
    }

    Ok(())
}
