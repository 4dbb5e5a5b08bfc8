use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DealerId(pub i64);

/// Product name to advertised price. Prices are display strings such as `"$30"` and are
/// never parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceList(BTreeMap<String, String>);

impl PriceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, product: impl Into<String>, price: impl Into<String>) -> Self {
        self.0.insert(product.into(), price.into());
        self
    }

    /// Exact, case-sensitive lookup.
    pub fn price_of(&self, product: &str) -> Option<&str> {
        self.0.get(product).map(String::as_str)
    }

    pub fn products(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<P, V> FromIterator<(P, V)> for PriceList
where
    P: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(product, price)| (product.into(), price.into())).collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dealer {
    pub id: DealerId,
    pub name: String,
    pub products: PriceList,
}

impl Dealer {
    pub fn price_of(&self, product: &str) -> Option<&str> {
        self.products.price_of(product)
    }
}
