//! One-shot catalog initialization: create the dealers table if absent and seed it.
//!
//! Presence of the table, not its row count, decides whether seeding runs. Once the table
//! exists the catalog is never reseeded, even if it is empty.

use tracing::{error, info};

use crate::repositories::RepositoryError;
use crate::schema::{ensure_schema, SchemaState};
use crate::seed::{CatalogSeed, SeedDealer, SeedResult, SEED_DEALERS};
use crate::DbPool;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogInit {
    Seeded(SeedResult),
    /// The table was created but the seed batch failed; queries run against an empty catalog.
    SeedFailed(String),
    AlreadyInitialized,
}

impl CatalogInit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seeded(_) => "seeded",
            Self::SeedFailed(_) => "seed_failed",
            Self::AlreadyInitialized => "already_initialized",
        }
    }
}

/// Must complete before any query traffic is accepted. Schema errors are returned; seed
/// errors are logged and reported as [`CatalogInit::SeedFailed`].
pub async fn initialize_catalog(pool: &DbPool) -> Result<CatalogInit, RepositoryError> {
    initialize_catalog_with(pool, SEED_DEALERS).await
}

pub(crate) async fn initialize_catalog_with(
    pool: &DbPool,
    dealers: &[SeedDealer],
) -> Result<CatalogInit, RepositoryError> {
    info!(event_name = "catalog.init.start", correlation_id = "bootstrap", "initializing catalog");

    if ensure_schema(pool).await? == SchemaState::AlreadyPresent {
        info!(
            event_name = "catalog.seed.skipped",
            correlation_id = "bootstrap",
            "dealers table already exists, skipping seed"
        );
        return Ok(CatalogInit::AlreadyInitialized);
    }

    match CatalogSeed::load_dealers(pool, dealers).await {
        Ok(result) => {
            info!(
                event_name = "catalog.seed.completed",
                correlation_id = "bootstrap",
                dealers = result.dealers_seeded.len(),
                "seed dealers inserted"
            );
            Ok(CatalogInit::Seeded(result))
        }
        Err(seed_error) => {
            error!(
                event_name = "catalog.seed.failed",
                correlation_id = "bootstrap",
                error = %seed_error,
                "seeding dealers failed, continuing with unseeded catalog"
            );
            Ok(CatalogInit::SeedFailed(seed_error.to_string()))
        }
    }
}
