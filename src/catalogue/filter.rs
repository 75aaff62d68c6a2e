use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{catalogue::sort::SortKey, error::CatalogueError, models::Product};

/// Active search and filter constraints of one catalogue view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FilterState {
    pub search: String,
    pub category: String,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub status: String,
    /// `None` keeps the loaded order.
    pub sort: Option<SortKey>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            price_min: None,
            price_max: None,
            status: String::new(),
            sort: Some(SortKey::NameAsc),
        }
    }
}

impl FilterState {
    /// True when no constraint would drop a product.
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty()
            && self.category.is_empty()
            && self.price_min.is_none()
            && self.price_max.is_none()
            && self.status.is_empty()
    }
}

pub fn filter_products(products: &[Product], state: &FilterState) -> Vec<Product> {
    if state.is_unconstrained() {
        return products.to_vec();
    }

    let needle = state.search.to_lowercase();
    products
        .iter()
        .filter(|product| matches(product, state, &needle))
        .cloned()
        .collect()
}

fn matches(product: &Product, state: &FilterState, needle: &str) -> bool {
    if !needle.is_empty()
        && !product.name.to_lowercase().contains(needle)
        && !product.code.to_lowercase().contains(needle)
    {
        return false;
    }

    if !state.category.is_empty() && product.category != state.category {
        return false;
    }

    if let Some(min) = state.price_min {
        match product.price {
            Some(price) if price >= min => {}
            _ => return false,
        }
    }

    if let Some(max) = state.price_max {
        match product.price {
            Some(price) if price <= max => {}
            _ => return false,
        }
    }

    if !state.status.is_empty() && product.status.as_str() != state.status {
        return false;
    }

    true
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Parses the price select encoding: `""`, `"500-1000"` or `"5000+"`.
///
/// A malformed bound is dropped (no constraint on that side); any other
/// shape is rejected.
pub fn parse_price_range(value: &str) -> Result<PriceRange, CatalogueError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(PriceRange::default());
    }

    if let Some(min) = value.strip_suffix('+') {
        return Ok(PriceRange {
            min: parse_bound(min),
            max: None,
        });
    }

    let parts: Vec<&str> = value.split('-').collect();
    match parts.as_slice() {
        [min, max] => Ok(PriceRange {
            min: parse_bound(min),
            max: parse_bound(max),
        }),
        _ => Err(CatalogueError::InvalidInput(format!(
            "unrecognised price range {value:?}"
        ))),
    }
}

fn parse_bound(raw: &str) -> Option<f64> {
    let parsed = raw.trim().parse::<f64>().ok();
    let bound = sanitize_bound(parsed);
    if bound.is_none() {
        tracing::warn!(bound = raw, "ignoring malformed price bound");
    }
    bound
}

/// Drops negative or non-finite price bounds.
pub fn sanitize_bound(bound: Option<f64>) -> Option<f64> {
    bound.filter(|b| b.is_finite() && *b >= 0.0)
}
