use dealerprice_core::domain::dealer::PriceList;
use sqlx::types::Json;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Reference catalog inserted when the dealers table is first created.
pub(crate) const SEED_DEALERS: &[SeedDealer] = &[
    SeedDealer { name: "Binglee", products: &[("Headphones", "$30"), ("Printer", "$75")] },
    SeedDealer {
        name: "DXC Electronics",
        products: &[("Mouse", "$20"), ("Printer", "$85"), ("Headphones", "$20")],
    },
    SeedDealer { name: "Bobay", products: &[("Headphones", "$20"), ("Printer", "$80")] },
    SeedDealer { name: "Tech City", products: &[("Mouse", "$20"), ("Laptop", "$850")] },
    SeedDealer { name: "Ez PC", products: &[("Laptop", "$1000")] },
    SeedDealer { name: "GH Computers", products: &[("Laptop", "$1500"), ("Printer", "$95")] },
];

pub(crate) struct SeedDealer {
    pub(crate) name: &'static str,
    pub(crate) products: &'static [(&'static str, &'static str)],
}

impl SeedDealer {
    fn price_list(&self) -> PriceList {
        self.products.iter().copied().collect()
    }
}

pub struct CatalogSeed;

impl CatalogSeed {
    /// Inserts every seed dealer in one transaction; any failed insert rolls back the batch.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        Self::load_dealers(pool, SEED_DEALERS).await
    }

    pub(crate) async fn load_dealers(
        pool: &DbPool,
        dealers: &[SeedDealer],
    ) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;

        for dealer in dealers {
            sqlx::query("INSERT INTO dealers (name, products) VALUES (?1, ?2)")
                .bind(dealer.name)
                .bind(Json(dealer.price_list()))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(SeedResult { dealers_seeded: dealers.iter().map(|dealer| dealer.name).collect() })
    }

    /// Checks that each seed dealer is present with exactly its seeded price list.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::with_capacity(SEED_DEALERS.len());

        for dealer in SEED_DEALERS {
            let stored: Option<Json<PriceList>> =
                sqlx::query_scalar("SELECT products FROM dealers WHERE name = ?1")
                    .bind(dealer.name)
                    .fetch_optional(pool)
                    .await?;

            let matches = stored.is_some_and(|Json(products)| products == dealer.price_list());
            checks.push((dealer.name, matches));
        }

        let all_present = checks.iter().all(|(_, present)| *present);
        Ok(VerificationResult { all_present, checks })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedResult {
    pub dealers_seeded: Vec<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}

impl VerificationResult {
    pub fn failed_checks(&self) -> Vec<&'static str> {
        self.checks.iter().filter_map(|(name, passed)| (!passed).then_some(*name)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogSeed;
    use crate::{connect_with_settings, schema};

    #[tokio::test]
    async fn load_inserts_six_reference_dealers() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        schema::ensure_schema(&pool).await.expect("schema");

        let result = CatalogSeed::load(&pool).await.expect("seed");

        assert_eq!(result.dealers_seeded.len(), 6);
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dealers")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 6);

        let verification = CatalogSeed::verify(&pool).await.expect("verify");
        assert!(verification.all_present, "failed: {:?}", verification.failed_checks());
    }

    #[tokio::test]
    async fn failed_insert_rolls_back_whole_batch() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        schema::ensure_schema(&pool).await.expect("schema");
        sqlx::query("INSERT INTO dealers (name, products) VALUES ('Ez PC', '{}')")
            .execute(&pool)
            .await
            .expect("pre-existing dealer");

        let result = CatalogSeed::load(&pool).await;

        assert!(result.is_err(), "duplicate name should abort the seed batch");
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dealers")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(count, 1, "no seed rows should survive the aborted batch");
    }

    #[tokio::test]
    async fn verify_reports_altered_and_missing_dealers() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        schema::ensure_schema(&pool).await.expect("schema");
        CatalogSeed::load(&pool).await.expect("seed");

        sqlx::query("DELETE FROM dealers WHERE name = 'Bobay'")
            .execute(&pool)
            .await
            .expect("remove dealer");
        sqlx::query("UPDATE dealers SET products = '{\"Laptop\":\"$999\"}' WHERE name = 'Ez PC'")
            .execute(&pool)
            .await
            .expect("alter dealer");

        let verification = CatalogSeed::verify(&pool).await.expect("verify");

        assert!(!verification.all_present);
        assert_eq!(verification.failed_checks(), vec!["Bobay", "Ez PC"]);
    }
}
