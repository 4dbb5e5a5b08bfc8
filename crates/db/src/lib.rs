pub mod catalog;
pub mod connection;
pub mod repositories;
pub mod schema;
pub mod seed;

pub use catalog::{initialize_catalog, CatalogInit};
pub use connection::{connect_with_settings, DbPool};
pub use repositories::{RepositoryError, SqlDealerRepository};
pub use schema::{ensure_schema, SchemaState};
pub use seed::{CatalogSeed, SeedResult, VerificationResult};
