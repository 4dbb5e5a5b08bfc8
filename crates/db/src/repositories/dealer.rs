use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::Row;

use dealerprice_core::domain::dealer::{Dealer, DealerId, PriceList};
use dealerprice_core::pricing::DealerCatalog;

use super::RepositoryError;
use crate::DbPool;

#[derive(Clone)]
pub struct SqlDealerRepository {
    pool: DbPool,
}

impl SqlDealerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_dealer(row: &sqlx::sqlite::SqliteRow) -> Result<Dealer, RepositoryError> {
    let id: i64 = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let name: String = row.try_get("name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let Json(products): Json<PriceList> = row.try_get("products").map_err(|e| {
        RepositoryError::Decode(format!("products of dealer `{name}` are malformed: {e}"))
    })?;

    Ok(Dealer { id: DealerId(id), name, products })
}

#[async_trait]
impl DealerCatalog for SqlDealerRepository {
    type Error = RepositoryError;

    async fn find_by_name(&self, name: &str) -> Result<Option<Dealer>, RepositoryError> {
        let row = sqlx::query("SELECT id, name, products FROM dealers WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_dealer).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Dealer>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, products FROM dealers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_dealer).collect::<Result<Vec<_>, _>>()
    }
}
