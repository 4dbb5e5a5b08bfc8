//! Price lookups over the dealer catalog.
//!
//! The service is stateless: every call is one read against the catalog followed by
//! in-memory filtering. Lookups by product scan every dealer; there is no product index
//! because the catalog is a handful of rows and is read rarely.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::dealer::Dealer;

/// Read access to the persisted dealer catalog.
#[async_trait]
pub trait DealerCatalog: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Exact, case-sensitive match on the dealer name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Dealer>, Self::Error>;

    /// Every dealer, in storage order.
    async fn list_all(&self) -> Result<Vec<Dealer>, Self::Error>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PriceLookup {
    Found { price: String },
    ProductNotAvailable,
    DealerNotFound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DealerPrice {
    pub dealer: String,
    pub price: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductPrices {
    Found(Vec<DealerPrice>),
    NoDealersForProduct,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductDealers {
    pub product: String,
    pub dealers: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DealerAvailability {
    Found(Vec<String>),
    NoDealers,
}

pub struct PriceQueryService<C> {
    catalog: C,
}

impl<C: DealerCatalog> PriceQueryService<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub async fn price_for(
        &self,
        dealer_name: &str,
        product_name: &str,
    ) -> Result<PriceLookup, C::Error> {
        let Some(dealer) = self.catalog.find_by_name(dealer_name).await? else {
            return Ok(PriceLookup::DealerNotFound);
        };

        Ok(match dealer.price_of(product_name) {
            Some(price) => PriceLookup::Found { price: price.to_string() },
            None => PriceLookup::ProductNotAvailable,
        })
    }

    /// Pairs keep the order `list_all` produced; nothing is sorted.
    pub async fn prices_for_product(&self, product_name: &str) -> Result<ProductPrices, C::Error> {
        let prices = self
            .catalog
            .list_all()
            .await?
            .into_iter()
            .filter_map(|dealer| {
                let price = dealer.price_of(product_name)?.to_string();
                Some(DealerPrice { dealer: dealer.name, price })
            })
            .collect::<Vec<_>>();

        if prices.is_empty() {
            Ok(ProductPrices::NoDealersForProduct)
        } else {
            Ok(ProductPrices::Found(prices))
        }
    }

    /// Every product carried by at least one dealer, sorted by product name.
    pub async fn product_index(&self) -> Result<Vec<ProductDealers>, C::Error> {
        let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for dealer in self.catalog.list_all().await? {
            for product in dealer.products.products() {
                index.entry(product.to_string()).or_default().push(dealer.name.clone());
            }
        }

        Ok(index.into_iter().map(|(product, dealers)| ProductDealers { product, dealers }).collect())
    }

    pub async fn dealers_for_product(
        &self,
        product_name: &str,
    ) -> Result<DealerAvailability, C::Error> {
        Ok(match self.prices_for_product(product_name).await? {
            ProductPrices::Found(prices) => {
                DealerAvailability::Found(prices.into_iter().map(|entry| entry.dealer).collect())
            }
            ProductPrices::NoDealersForProduct => DealerAvailability::NoDealers,
        })
    }
}
