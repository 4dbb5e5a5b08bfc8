//! Price lookup routes.
//!
//! - `GET /price/{dealer}/{product}`: one dealer's price for a product
//! - `GET /allprice/{product}`      : every dealer's price for a product
//! - `GET /products`                : products with the dealers that carry them
//! - `GET /getdealers/{product}`    : dealers that carry a product

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use dealerprice_core::{
    ApplicationError, DealerAvailability, PriceLookup, PriceQueryService, ProductPrices,
};
use dealerprice_db::{RepositoryError, SqlDealerRepository};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

pub type PriceService = PriceQueryService<SqlDealerRepository>;

#[derive(Clone)]
pub struct PriceState {
    service: Arc<PriceService>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AllPricesResponse {
    Prices { prices: Vec<PriceEntry> },
    Message { message: String },
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductListing {
    pub product: String,
    #[serde(rename = "Dealers")]
    pub dealers: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductsResponse {
    pub products: Vec<ProductListing>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealersResponse {
    pub dealers: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// A storage failure already logged with its detail; only the generic message leaves.
#[derive(Debug)]
pub struct ApiFailure(ApplicationError);

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = ErrorResponse { error: self.0.user_message().to_string() };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

fn storage_failure(event_name: &'static str, source: RepositoryError) -> ApiFailure {
    let failure = ApplicationError::persistence(&source);
    let correlation_id = Uuid::new_v4();
    error!(
        event_name,
        correlation_id = %correlation_id,
        error_class = failure.error_class(),
        error = %source,
        "catalog query failed"
    );
    ApiFailure(failure)
}

fn message(text: String) -> Json<MessageResponse> {
    Json(MessageResponse { message: text })
}

pub fn router(service: Arc<PriceService>) -> Router {
    Router::new()
        .route("/price/{dealer}/{product}", get(price))
        .route("/allprice/{product}", get(all_prices))
        .route("/products", get(products))
        .route("/getdealers/{product}", get(dealers_for_product))
        .with_state(PriceState { service })
}

async fn price(
    Path((dealer, product)): Path<(String, String)>,
    State(state): State<PriceState>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiFailure> {
    let lookup = state
        .service
        .price_for(&dealer, &product)
        .await
        .map_err(|e| storage_failure("http.price.storage_failure", e))?;

    Ok(match lookup {
        PriceLookup::Found { price } => {
            (StatusCode::OK, message(format!("{product} costs {price} at {dealer}")))
        }
        PriceLookup::ProductNotAvailable => {
            (StatusCode::OK, message(format!("{product} is not available with {dealer}")))
        }
        PriceLookup::DealerNotFound => {
            (StatusCode::NOT_FOUND, message("Dealer not found".to_string()))
        }
    })
}

async fn all_prices(
    Path(product): Path<String>,
    State(state): State<PriceState>,
) -> Result<Json<AllPricesResponse>, ApiFailure> {
    let prices = state
        .service
        .prices_for_product(&product)
        .await
        .map_err(|e| storage_failure("http.allprice.storage_failure", e))?;

    Ok(Json(match prices {
        ProductPrices::Found(prices) => AllPricesResponse::Prices {
            prices: prices
                .into_iter()
                .map(|entry| PriceEntry { key: entry.dealer, value: entry.price })
                .collect(),
        },
        ProductPrices::NoDealersForProduct => {
            AllPricesResponse::Message { message: format!("No dealers found for {product}") }
        }
    }))
}

async fn products(State(state): State<PriceState>) -> Result<Json<ProductsResponse>, ApiFailure> {
    let index = state
        .service
        .product_index()
        .await
        .map_err(|e| storage_failure("http.products.storage_failure", e))?;

    Ok(Json(ProductsResponse {
        products: index
            .into_iter()
            .map(|entry| ProductListing { product: entry.product, dealers: entry.dealers })
            .collect(),
    }))
}

async fn dealers_for_product(
    Path(product): Path<String>,
    State(state): State<PriceState>,
) -> Result<Response, ApiFailure> {
    let availability = state
        .service
        .dealers_for_product(&product)
        .await
        .map_err(|e| storage_failure("http.getdealers.storage_failure", e))?;

    Ok(match availability {
        DealerAvailability::Found(dealers) => Json(DealersResponse { dealers }).into_response(),
        DealerAvailability::NoDealers => (
            StatusCode::NOT_FOUND,
            message(format!("Could not find dealers for {product}")),
        )
            .into_response(),
    })
}
