// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::chart_repository::ChartRepository;
use crate::application::options_service::OptionsService;
use crate::application::query_renderer::ChartService;
use crate::infrastructure::config::{load_app_config, StoreKind};
use crate::infrastructure::mock_repository::MockRepository;
use crate::infrastructure::postgres_repository::PostgresRepository;
use crate::infrastructure::templates::SqlTemplateStore;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository: Arc<dyn ChartRepository> = match config.store.kind {
        StoreKind::Postgres => Arc::new(PostgresRepository::new(&config.store)?),
        StoreKind::Mock => {
            tracing::warn!("Using mock data store");
            Arc::new(MockRepository::new())
        }
    };
    let templates = Arc::new(SqlTemplateStore::load(config.templates.dir.as_deref())?);

    // Create services (application layer)
    let chart_service = ChartService::new(repository.clone(), templates, config.store.table);
    let options_service = OptionsService::new(repository);

    // Create application state
    let state = Arc::new(AppState {
        chart_service,
        options_service,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .addr
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server.addr))?;
    tracing::info!("Starting chart-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
