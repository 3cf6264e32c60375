mod config;
mod cv;
mod errors;
mod layout;
mod render;
mod routes;
mod state;
mod verify;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::cv::FileCvSource;
use crate::layout::TextHeightEstimator;
use crate::render::compose_document;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (defaults cover a bare environment)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the record source
    let source = Arc::new(FileCvSource::new(&config.data_path));
    info!("CV source: {}", config.data_path);

    // Initialize the height estimator (Inter metric table)
    let estimator = Arc::new(TextHeightEstimator::default());

    // Layout configuration with environment tuning overrides
    let layout = config.layout_config();
    info!(
        "Layout: {}x{}px, first page budget {:.1}px, continuation {:.1}px",
        layout.geometry.page_width_px,
        layout.geometry.page_height_px,
        layout.first_page_budget(),
        layout.continuation_capacity()
    );

    // HTTP client for outbound link verification
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .build()?;

    // Initial render pass, so GET /cv is ready as soon as the port is open
    let outcome = compose_document(source.as_ref(), estimator.as_ref(), &layout).await;
    info!(
        "Initial render: {} page(s), {} failure(s)",
        outcome.page_count,
        outcome.errors.len()
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        source,
        estimator,
        layout,
        http,
        snapshot: Arc::new(RwLock::new(Some(outcome))),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
