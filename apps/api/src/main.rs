mod analysis;
mod config;
mod db;
mod errors;
mod extraction;
mod jobs;
mod models;
mod resumes;
mod routes;
mod state;
mod storage;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageBackend};
use crate::db::connect_postgres_store;
use crate::extraction::PdfTextExtractor;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{
    KeyValueStore, MemoryStore, ObjectStore, RedisStore, Repository, S3ObjectStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumatch API v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config).await?;
    info!("Storage backend: {}", store.backend());

    let objects = match &config.s3 {
        Some(s3) => {
            let objects = S3ObjectStore::connect(s3).await;
            info!("Retaining uploads in bucket {}", objects.bucket());
            Some(Arc::new(objects) as Arc<dyn ObjectStore>)
        }
        None => None,
    };

    let state = AppState {
        repo: Repository::new(store),
        extractor: Arc::new(PdfTextExtractor),
        objects,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.storage_backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Redis => {
            let url = config.redis_url.as_deref().context("REDIS_URL is not set")?;
            let client = redis::Client::open(url)?;
            Arc::new(RedisStore::new(client, config.storage_key_prefix.clone()))
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is not set")?;
            Arc::new(connect_postgres_store(url).await?)
        }
    };
    Ok(store)
}
