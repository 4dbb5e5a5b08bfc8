use tracing::info;

use crate::repositories::RepositoryError;
use crate::DbPool;

pub const DEALERS_TABLE: &str = "dealers";

/// `products` must hold a JSON object; the CHECK keeps malformed text out at write time.
const CREATE_DEALERS_TABLE: &str = "CREATE TABLE dealers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE CHECK (length(name) > 0),
    products TEXT NOT NULL CHECK (json_valid(products) AND json_type(products) = 'object')
)";

// CHECK cannot hold a subquery, so string-only prices are enforced by triggers.
const CREATE_PRICE_TRIGGERS: [&str; 2] = [
    "CREATE TRIGGER dealers_prices_are_text_on_insert
    BEFORE INSERT ON dealers
    WHEN EXISTS (SELECT 1 FROM json_each(NEW.products) WHERE type <> 'text')
    BEGIN
        SELECT RAISE(ABORT, 'dealer prices must be strings');
    END",
    "CREATE TRIGGER dealers_prices_are_text_on_update
    BEFORE UPDATE OF products ON dealers
    WHEN EXISTS (SELECT 1 FROM json_each(NEW.products) WHERE type <> 'text')
    BEGIN
        SELECT RAISE(ABORT, 'dealer prices must be strings');
    END",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaState {
    Created,
    AlreadyPresent,
}

pub async fn dealers_table_exists(pool: &DbPool) -> Result<bool, RepositoryError> {
    let exists: i64 = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
    )
    .bind(DEALERS_TABLE)
    .fetch_one(pool)
    .await?;

    Ok(exists == 1)
}

/// Creates the dealers table when it is absent.
///
/// Check-then-create is not atomic: run it from a single initializer before serving
/// queries. A second racing initializer fails on `CREATE TABLE` rather than duplicating rows.
pub async fn ensure_schema(pool: &DbPool) -> Result<SchemaState, RepositoryError> {
    let exists = dealers_table_exists(pool).await?;
    info!(
        event_name = "catalog.schema.checked",
        table = DEALERS_TABLE,
        exists,
        "checked for dealers table"
    );

    if exists {
        return Ok(SchemaState::AlreadyPresent);
    }

    let mut tx = pool.begin().await?;
    sqlx::query(CREATE_DEALERS_TABLE).execute(&mut *tx).await?;
    for trigger in CREATE_PRICE_TRIGGERS {
        sqlx::query(trigger).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    info!(event_name = "catalog.schema.created", table = DEALERS_TABLE, "dealers table created");

    Ok(SchemaState::Created)
}
