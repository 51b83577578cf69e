//! Radar overlay viewer.
//!
//! Subcommands:
//! - `serve`: HTTP server for the map front end
//! - `render`: write the classified overlay to a PNG file
//! - `query`: print the popup text for one coordinate

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use radar_common::GeoCoordinate;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use radar_viewer::config::ViewerConfig;
use radar_viewer::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "radar-viewer")]
#[command(about = "Radar reflectivity overlay with point queries")]
struct Args {
    /// Viewer configuration file
    #[arg(long, env = "RADAR_CONFIG", default_value = "config/radar.yaml")]
    config: PathBuf,

    /// Override the raster source (path or URL)
    #[arg(long, env = "RADAR_SOURCE")]
    source: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the overlay and point queries over HTTP
    Serve {
        /// Listen address (overrides the config file)
        #[arg(short, long, env = "LISTEN_ADDR")]
        listen: Option<String>,
    },
    /// Render the classified overlay to a PNG file
    Render {
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print the popup text at a coordinate
    Query {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let mut config = ViewerConfig::load(&args.config)?;
    if let Some(source) = args.source {
        config.raster.source = source;
    }

    match args.command {
        Command::Serve { listen } => serve(config, listen).await,
        Command::Render { output } => render(config, output).await,
        Command::Query { lat, lon } => query(config, GeoCoordinate::new(lat, lon)).await,
    }
}

async fn serve(mut config: ViewerConfig, listen: Option<String>) -> Result<()> {
    if let Some(listen) = listen {
        config.server.listen = listen;
    }
    let addr: SocketAddr = config
        .server
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.server.listen))?;

    info!(source = %config.raster.source, "Starting radar viewer");

    // A failed load keeps serving the base map configuration
    let state = Arc::new(AppState::load(config).await?);
    let app = radar_viewer::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn render(config: ViewerConfig, output: PathBuf) -> Result<()> {
    let state = AppState::load(config).await?;
    let overlay = match state.ready() {
        Ok(overlay) => overlay,
        Err(e) => bail!("Could not load the map layer: {}", e),
    };

    tokio::fs::write(&output, overlay.png())
        .await
        .with_context(|| format!("Failed to write {:?}", output))?;
    info!(
        output = %output.display(),
        painted = overlay.painted_pixels(),
        "Overlay written"
    );
    Ok(())
}

async fn query(config: ViewerConfig, coord: GeoCoordinate) -> Result<()> {
    let state = AppState::load(config).await?;
    if let Err(e) = state.ready() {
        bail!("Could not load the map layer: {}", e);
    }

    if let Some(text) = state.click_handler().on_click(coord) {
        println!("{}", text);
    }
    Ok(())
}
