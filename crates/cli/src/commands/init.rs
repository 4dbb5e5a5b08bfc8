use dealerprice_db::{initialize_catalog, CatalogInit, CatalogSeed};
use serde_json::json;

use crate::commands::{with_pool, CommandFailure, CommandResult};

pub fn run() -> CommandResult {
    let result = with_pool("init", |pool| async move {
        let init = initialize_catalog(&pool)
            .await
            .map_err(|error| ("schema", error.to_string(), 5u8))?;

        let verification = match &init {
            CatalogInit::Seeded(_) => Some(
                CatalogSeed::verify(&pool)
                    .await
                    .map_err(|error| ("seed_verification", error.to_string(), 6u8))?,
            ),
            CatalogInit::SeedFailed(_) | CatalogInit::AlreadyInitialized => None,
        };

        Ok::<_, CommandFailure>((init, verification))
    });

    let (init, verification) = match result {
        Ok(outcome) => outcome,
        Err(failure) => return failure,
    };

    match (&init, verification) {
        (CatalogInit::Seeded(_), Some(verification)) if !verification.all_present => {
            CommandResult::failure(
                "init",
                "seed_verification",
                format!(
                    "Seed verification failed for dealers: {}",
                    verification.failed_checks().join(", ")
                ),
                6,
            )
        }
        (CatalogInit::Seeded(seed), _) => CommandResult::success_with_data(
            "init",
            format!("dealer catalog created and seeded with {} dealers", seed.dealers_seeded.len()),
            Some(json!({ "catalog": init.as_str(), "dealers": seed.dealers_seeded })),
        ),
        (CatalogInit::SeedFailed(reason), _) => CommandResult::success_with_data(
            "init",
            format!("dealer catalog created but seeding failed: {reason}"),
            Some(json!({ "catalog": init.as_str() })),
        ),
        (CatalogInit::AlreadyInitialized, _) => CommandResult::success_with_data(
            "init",
            "dealer catalog already exists; seeding skipped",
            Some(json!({ "catalog": init.as_str() })),
        ),
    }
}
