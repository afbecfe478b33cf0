use anyhow::Context;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex_backend::api;
use pokedex_backend::catalog::PokeApiClient;
use pokedex_backend::config;
use pokedex_backend::search::NameSearchIndex;
use pokedex_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    config::init_config().map_err(anyhow::Error::msg)?;
    let app_config = config::config();
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    // Load name index / 加载名称索引
    let index_path = app_config.get_index_path();
    let index = NameSearchIndex::load(&index_path)
        .with_context(|| format!("Failed to load name index from {:?}", index_path))?;

    let catalog = PokeApiClient::new(&app_config.catalog).context("Failed to create catalog client")?;
    tracing::info!("Using catalog at {}", catalog.base_url());

    let bind_addr = app_config.get_bind_address();
    let state = AppState::new(index, Arc::new(catalog), app_config)
        .map_err(|e| anyhow::anyhow!("Failed to register metrics: {}", e))?;
    let state = Arc::new(state);

    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("Server running on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<std::net::SocketAddr>()).await?;

    Ok(())
}
