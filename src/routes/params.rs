use serde::Deserialize;
use utoipa::ToSchema;

use crate::catalogue::{FilterState, SortKey, parse_price_range};

pub const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CatalogueQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    /// Price select value, e.g. `500-1000` or `5000+`.
    pub price: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl CatalogueQuery {
    /// Builds the filter state, dropping malformed values instead of
    /// rejecting the request.
    pub fn filter_state(&self) -> FilterState {
        let mut filters = FilterState {
            search: trimmed(&self.q),
            category: trimmed(&self.category),
            status: trimmed(&self.status),
            ..FilterState::default()
        };

        if let Some(price) = &self.price {
            match parse_price_range(price) {
                Ok(range) => {
                    filters.price_min = range.min;
                    filters.price_max = range.max;
                }
                Err(err) => tracing::warn!(error = %err, "ignoring price filter"),
            }
        }
        if let Some(min) = price_bound(&self.price_min) {
            filters.price_min = Some(min);
        }
        if let Some(max) = price_bound(&self.price_max) {
            filters.price_max = Some(max);
        }

        if let Some(sort) = &self.sort {
            filters.sort = SortKey::parse(sort);
            if filters.sort.is_none() {
                tracing::warn!(sort = %sort, "unknown sort key, keeping loaded order");
            }
        }

        filters
    }

    pub fn page_size(&self, default: usize) -> usize {
        self.per_page.unwrap_or(default).clamp(1, MAX_PER_PAGE)
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn price_bound(value: &Option<String>) -> Option<f64> {
    let raw = value.as_deref()?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(bound) if bound.is_finite() && bound >= 0.0 => Some(bound),
        _ => {
            tracing::warn!(bound = raw, "ignoring malformed price bound");
            None
        }
    }
}
