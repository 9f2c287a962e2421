//! Revue API server

use revue_api::album::HttpAlbumGateway;
use revue_api::store::{
    MemoryCredentialStore, MemoryReviewStore, PgCredentialStore, PgReviewStore,
};
use revue_api::{create_router, state::AppState};
use revue_core::{AlbumInfoGateway, AppConfig, CredentialStore, ReviewStore};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .init();

    let state = build_state(config).await?;
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("revue API server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the shared state, picking store backends from configuration
async fn build_state(config: AppConfig) -> anyhow::Result<Arc<AppState>> {
    let albums: Arc<dyn AlbumInfoGateway> =
        Arc::new(HttpAlbumGateway::from_config(&config.album)?);

    let (credentials, reviews): (Arc<dyn CredentialStore>, Arc<dyn ReviewStore>) =
        match &config.database.url {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .connect(url)
                    .await?;
                tracing::info!("connected to postgres");
                (
                    Arc::new(PgCredentialStore::new(pool.clone())),
                    Arc::new(PgReviewStore::new(pool)),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory stores");
                (
                    Arc::new(MemoryCredentialStore::new()),
                    Arc::new(MemoryReviewStore::new()),
                )
            }
        };

    Ok(Arc::new(AppState::new(config, credentials, reviews, albums)))
}
