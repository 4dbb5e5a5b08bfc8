use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use dealerprice_core::config::{AppConfig, ConfigError, CorsConfig};
use dealerprice_core::PriceQueryService;
use dealerprice_db::{
    connect_with_settings, initialize_catalog, CatalogInit, DbPool, RepositoryError,
    SqlDealerRepository,
};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{health, routes};

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub catalog: CatalogInit,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("catalog schema setup failed: {0}")]
    Schema(#[source] RepositoryError),
    #[error("invalid CORS origin `{0}`")]
    InvalidCorsOrigin(String),
}

/// Connects and initializes the catalog. Returns only once seeding has finished, so the
/// caller can start serving immediately afterwards.
pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    let catalog = initialize_catalog(&db_pool).await.map_err(BootstrapError::Schema)?;
    info!(
        event_name = "system.bootstrap.catalog_ready",
        correlation_id = "bootstrap",
        catalog = catalog.as_str(),
        "dealer catalog initialized"
    );

    Ok(Application { config, db_pool, catalog })
}

impl Application {
    pub fn router(&self) -> Result<Router, BootstrapError> {
        let service = Arc::new(PriceQueryService::new(SqlDealerRepository::new(
            self.db_pool.clone(),
        )));
        let router = routes::router(service).merge(health::router(self.db_pool.clone()));

        let router = match cors_layer(&self.config.cors)? {
            Some(cors) => router.layer(cors),
            None => router,
        };

        Ok(router.layer(TraceLayer::new_for_http()))
    }
}

/// CORS is only enabled in development mode.
fn cors_layer(cors: &CorsConfig) -> Result<Option<CorsLayer>, BootstrapError> {
    if !cors.enabled() {
        return Ok(None);
    }

    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| BootstrapError::InvalidCorsOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    ))
}
