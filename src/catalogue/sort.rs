use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{format::fold_accents, models::Product};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    DateAsc,
    DateDesc,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "name-asc" => Some(SortKey::NameAsc),
            "name-desc" => Some(SortKey::NameDesc),
            "price-asc" => Some(SortKey::PriceAsc),
            "price-desc" => Some(SortKey::PriceDesc),
            "date-asc" => Some(SortKey::DateAsc),
            "date-desc" => Some(SortKey::DateDesc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::NameAsc => compare_names(&a.name, &b.name),
            SortKey::NameDesc => compare_names(&b.name, &a.name),
            SortKey::PriceAsc => price_of(a).total_cmp(&price_of(b)),
            SortKey::PriceDesc => price_of(b).total_cmp(&price_of(a)),
            SortKey::DateAsc => a.created_at.cmp(&b.created_at),
            SortKey::DateDesc => b.created_at.cmp(&a.created_at),
        }
    }
}

/// Returns a stably sorted copy. `None` keeps the input order.
pub fn sort_products(products: &[Product], key: Option<SortKey>) -> Vec<Product> {
    let mut sorted = products.to_vec();
    if let Some(key) = key {
        sorted.sort_by(|a, b| key.compare(a, b));
    }
    sorted
}

fn price_of(product: &Product) -> f64 {
    product.price.unwrap_or(0.0)
}

/// Collation close to a browser `localeCompare`: letters first compare
/// without accents or case, then accents, then lower case before upper case.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold_accents(&a.to_lowercase())
        .cmp(&fold_accents(&b.to_lowercase()))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| {
            let case_a = a.chars().map(char::is_uppercase);
            let case_b = b.chars().map(char::is_uppercase);
            case_a.cmp(case_b)
        })
        .then_with(|| a.cmp(b))
}
