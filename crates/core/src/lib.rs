pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;

pub use domain::dealer::{Dealer, DealerId, PriceList};
pub use errors::{ApplicationError, INTERNAL_ERROR_MESSAGE};
pub use pricing::{
    DealerAvailability, DealerCatalog, DealerPrice, PriceLookup, PriceQueryService,
    ProductDealers, ProductPrices,
};
