//! AgroDash - field monitoring dashboard.
//!
//! Run with: `cargo run -p agrodash-service`

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use agrodash_service::{AppState, Config, api, config};
use agrodash_store::Gateway;

/// AgroDash - read-only dashboard for field sensors.
#[derive(Parser, Debug)]
#[command(name = "agrodash")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config).
    #[arg(short, long)]
    bind: Option<String>,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug {
        "agrodash_service=debug,agrodash_store=debug,tower_http=debug"
    } else {
        "agrodash_service=info,agrodash_store=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    // Configuration problems are fatal before anything is served.
    let config_path = args.config.unwrap_or_else(config::default_config_path);
    let mut config = Config::load_validated(&config_path)?;

    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    info!(
        "Reading monitoring database {} as {}",
        config.database.dsn.display(),
        config.database.user
    );
    let gateway = Gateway::new(&config.database.dsn);
    let state = AppState::new(gateway);

    let app = api::router()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr: SocketAddr = config.server.bind.parse()?;

    info!("Serving dashboard on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
