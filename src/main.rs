//! Transportation order server binary

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use transportation_order_server::api::{create_router, AppState};
use transportation_order_server::config::{AppConfig, LogFormat};
use transportation_order_server::fixture::{load_fixture, seed_repository};
use transportation_order_server::repository::{
    FileRepository, InMemoryRepository, OrderRepository, RepositoryConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    let (repository_config, seed) = config
        .repository_runtime()
        .context("invalid storage configuration")?;

    let repository = build_repository(&repository_config).await?;

    if let Some(seed) = seed {
        seed_from_file(repository.as_ref(), seed).await?;
    }

    let router = create_router(AppState::new(repository));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_repository(config: &RepositoryConfig) -> anyhow::Result<Arc<dyn OrderRepository>> {
    match config {
        RepositoryConfig::Memory => {
            tracing::info!("Using in-memory order repository");
            Ok(Arc::new(InMemoryRepository::new()))
        }
        RepositoryConfig::Local { path } => {
            tracing::info!(%path, "Using file-backed order repository");
            let repository = FileRepository::open_local(path)
                .await
                .with_context(|| format!("failed to open order file {}", path))?;
            Ok(Arc::new(repository))
        }
    }
}

async fn seed_from_file(repository: &dyn OrderRepository, path: PathBuf) -> anyhow::Result<()> {
    let orders = load_fixture(&path)
        .await
        .with_context(|| format!("failed to read seed file {}", path.display()))?;

    let count = seed_repository(repository, orders)
        .await
        .context("failed to seed repository")?;

    tracing::info!(count, path = %path.display(), "Seeded orders");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("transportation_order_server=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}
