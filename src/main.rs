use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinelog_api::{
    config::Config,
    db,
    routes::{create_router, AppState},
    services::{
        preferences::{PreferenceStore, RedisPreferenceStore},
        providers::{tmdb::TmdbProvider, CatalogProvider},
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "cinelog_api=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let db_pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Connected to PostgreSQL");

    let redis_client = db::create_redis_client(&config.redis_url)?;
    let (cache, cache_writer) = db::Cache::new(redis_client.clone()).await;

    let catalog: Arc<dyn CatalogProvider> = Arc::new(TmdbProvider::new(
        cache,
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.catalog_language.clone(),
        config.catalog_region.clone(),
    ));

    let preferences: Arc<dyn PreferenceStore> =
        Arc::new(RedisPreferenceStore::new(redis_client));

    let state = Arc::new(AppState {
        db_pool,
        catalog,
        preferences,
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cache_writer.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown signal handler");
    }
    tracing::info!("Shutdown signal received");
}
