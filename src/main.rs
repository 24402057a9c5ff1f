// src/main.rs

use axum::routing::{get, post};
use axum::{serve, Router};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

mod api;
mod config;
mod error;
mod logging;
mod model;
mod serving;
mod store;

use config::ServeConfig;
use logging::logger::DeliveryLogger;
use model::adapters::{FileSeedAdapter, SeedAdapter};
use store::{AdStore, MemoryAdStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AdStore>,
    pub config: ServeConfig,
    pub delivery_logger: Arc<DeliveryLogger>,
}

#[derive(Parser, Debug)]
#[command(version = "1.0", about = "Ad targeting and analytics server for a blogging platform")]
struct CliArgs {
    #[arg(short, long, default_value_t = 8080)]
    port: u16,
    #[arg(long, default_value = "logs")]
    log_dir: String,
    /// JSON file with seed campaign definitions.
    #[arg(long, default_value = "static/ads.json")]
    ads_file: String,
    /// How many ads a single slot may display.
    #[arg(long, default_value_t = 1)]
    max_per_slot: usize,
    /// Store wait budget on the display path, in milliseconds.
    #[arg(long, default_value_t = 150)]
    store_wait_ms: u64,
}

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    // Global tracing output: JSON lines into an hourly rolling file.
    let log_file = rolling::hourly(&args.log_dir, "blog_ads.json");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json().with_writer(non_blocking));
    tracing::subscriber::set_global_default(subscriber)
        .expect("Unable to set global tracing subscriber");
    info!("ad server starting on port {}", args.port);

    // Per-request delivery records go through their own batched writer.
    let delivery_logger = DeliveryLogger::new(&args.log_dir, "ad_delivery", 1000, 100, 1000);

    // Seed the store from the campaign file; an empty or missing file just
    // means the server starts with no campaigns.
    let seed = FileSeedAdapter::new(&args.ads_file);
    let memory_store = MemoryAdStore::new();
    let seed_ads = seed.get_ads();
    info!("loaded {} seed campaigns from {}", seed_ads.len(), args.ads_file);
    memory_store.load(seed_ads).await;
    let store: Arc<dyn AdStore> = Arc::new(memory_store);

    let state = Arc::new(AppState {
        store,
        config: ServeConfig::new(args.max_per_slot, args.store_wait_ms),
        delivery_logger: delivery_logger.clone(),
    });

    let ad_server = tokio::spawn({
        let state = state.clone();
        let port = args.port;
        async move {
            let app = Router::new()
                .route("/ads/serve", post(api::handlers::serve_ads))
                .route("/ads", post(api::handlers::create_ad))
                .route("/ads/{id}", get(api::handlers::get_ad).delete(api::handlers::delete_ad))
                .route("/ads/{id}/impression", post(api::handlers::track_impression))
                .route("/ads/{id}/click", post(api::handlers::track_click))
                .with_state(state);
            let addr = format!("0.0.0.0:{}", port);
            info!("ad server running at http://{}", addr);
            let listener = TcpListener::bind(&addr).await.unwrap();
            serve(listener, app).await.unwrap();
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("shutting down gracefully...");
        }
    }

    delivery_logger.shutdown().await;
    ad_server.abort();
    info!("ad server shut down.");
}
