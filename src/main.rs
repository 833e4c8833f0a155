use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dashcache::common::AppState;
use dashcache::config::Config;
use dashcache::routes;
use dashcache::upstream::HttpUpstream;
use dashcache::worker::{CacheWorker, LifecycleEvent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dashcache=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting dashcache...");

    // Load configuration (fail-fast)
    let config = Config::from_env()?;
    tracing::info!(
        upstream = %config.upstream_base_url,
        host = %config.api_host,
        port = config.api_port,
        core_cache = %config.core_cache_name,
        data_cache = %config.data_cache_name,
        "Configuration loaded"
    );

    // Build the worker against the upstream dashboard backend
    let upstream = HttpUpstream::new(&config);
    let worker = CacheWorker::new(&config, upstream);

    // Install: precache the asset manifest. A failed install aborts startup,
    // leaving whatever served requests before this deployment in control.
    worker.handle_event(LifecycleEvent::Install).await?;

    // Activate: sweep partitions left over from previous versions
    worker.handle_event(LifecycleEvent::Activate).await?;

    // Build router
    let state = AppState::new(config.clone(), worker);
    let app = routes::build_router(state);

    // Start server with graceful shutdown
    let addr = config.bind_address();
    tracing::info!(address = %addr, "Starting server");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        },
    }
}
