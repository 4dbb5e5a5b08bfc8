use dealerprice_core::{PriceLookup, PriceQueryService, ProductPrices};
use dealerprice_db::SqlDealerRepository;
use serde_json::json;

use crate::commands::{with_pool, CommandFailure, CommandResult};

fn query_failure(error: dealerprice_db::RepositoryError) -> CommandFailure {
    ("query", error.to_string(), 6)
}

pub fn price(dealer: &str, product: &str) -> CommandResult {
    let lookup = with_pool("price", |pool| async move {
        PriceQueryService::new(SqlDealerRepository::new(pool))
            .price_for(dealer, product)
            .await
            .map_err(query_failure)
    });

    match lookup {
        Ok(PriceLookup::Found { price }) => CommandResult::success_with_data(
            "price",
            format!("{product} costs {price} at {dealer}"),
            Some(json!({ "dealer": dealer, "product": product, "price": price })),
        ),
        Ok(PriceLookup::ProductNotAvailable) => CommandResult::success_with_data(
            "price",
            format!("{product} is not available with {dealer}"),
            Some(json!({ "dealer": dealer, "product": product, "price": null })),
        ),
        Ok(PriceLookup::DealerNotFound) => CommandResult::not_found("price", "Dealer not found"),
        Err(failure) => failure,
    }
}

pub fn prices(product: &str) -> CommandResult {
    let prices = with_pool("prices", |pool| async move {
        PriceQueryService::new(SqlDealerRepository::new(pool))
            .prices_for_product(product)
            .await
            .map_err(query_failure)
    });

    match prices {
        Ok(ProductPrices::Found(prices)) => {
            let entries = prices
                .iter()
                .map(|entry| json!({ "key": entry.dealer, "value": entry.price }))
                .collect::<Vec<_>>();
            CommandResult::success_with_data(
                "prices",
                format!("{product} is sold by {} dealers", prices.len()),
                Some(json!({ "product": product, "prices": entries })),
            )
        }
        Ok(ProductPrices::NoDealersForProduct) => {
            CommandResult::success("prices", format!("No dealers found for {product}"))
        }
        Err(failure) => failure,
    }
}

pub fn products() -> CommandResult {
    let index = with_pool("products", |pool| async move {
        PriceQueryService::new(SqlDealerRepository::new(pool))
            .product_index()
            .await
            .map_err(query_failure)
    });

    match index {
        Ok(index) => {
            let products = index
                .iter()
                .map(|entry| json!({ "product": entry.product, "dealers": entry.dealers }))
                .collect::<Vec<_>>();
            CommandResult::success_with_data(
                "products",
                format!("{} products in catalog", index.len()),
                Some(json!({ "products": products })),
            )
        }
        Err(failure) => failure,
    }
}
