//! scanwise-sr (Scan Resolution) - barcode-to-health-assessment service
//!
//! Resolves product barcodes through a tiered lookup chain (cache, durable
//! store, Open Food Facts, cosmetics, static fallback) and serves the
//! resulting assessments plus an administrative API over HTTP.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use scanwise_common::config::ScanwiseConfig;
use scanwise_common::db::init_database;
use scanwise_sr::cache::ProductCache;
use scanwise_sr::resolver::Resolver;
use scanwise_sr::sources::{CosmeticsSource, FallbackTable, OpenFoodFactsClient, StoreAdapter};
use scanwise_sr::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "scanwise-sr", about = "Scanwise scan-resolution service")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// HTTP listen port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// SQLite database path (overrides config)
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Scanwise Scan Resolution (scanwise-sr) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // Config file + env, then CLI flags on top (highest priority)
    let mut config = ScanwiseConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database) = args.database {
        config.database_path = database;
    }

    info!("Database path: {}", config.database_path.display());
    let pool = init_database(&config.database_path).await?;

    let cache = ProductCache::new(config.cache_capacity);
    if let Some(capacity) = config.cache_capacity {
        info!(capacity, "Product cache capacity bounded");
    }

    let store = StoreAdapter::new(pool.clone());
    let nutrition_api = OpenFoodFactsClient::new(
        &config.off_base_url,
        Duration::from_secs(config.http_timeout_secs),
    )?;
    let fallback = FallbackTable::new();
    let fallback_size = fallback.len();

    let resolver = Arc::new(Resolver::new(
        cache.clone(),
        store,
        nutrition_api,
        CosmeticsSource::new(),
        fallback,
    ));

    let state = AppState::new(pool, cache, resolver, fallback_size);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.port)).await?;
    info!("scanwise-sr listening on http://127.0.0.1:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
