use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::models::ProductStatus;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub products_path: PathBuf,
    pub catalogue: CatalogueConfig,
    pub rate_limit: RateLimitConfig,
}

/// Settings shared by the catalogue controller and the HTTP adapter.
#[derive(Debug, Clone)]
pub struct CatalogueConfig {
    pub page_size: usize,
    pub search_debounce: Duration,
    /// Status requested from the product source on every load.
    pub load_status: Option<ProductStatus>,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            search_debounce: Duration::from_millis(300),
            load_status: Some(ProductStatus::Published),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_minute: usize,
    pub per_hour: usize,
    pub per_day: usize,
    /// Key clients on the first `x-forwarded-for` hop instead of the peer
    /// address. Only safe behind a proxy that overwrites the header.
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_minute: 60,
            per_hour: 1000,
            per_day: 10000,
            trust_forwarded_for: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parsed_var("APP_PORT").unwrap_or(3000);
        let products_path = env::var("PRODUCTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/products.json"));

        let defaults = CatalogueConfig::default();
        let load_status = match env::var("CATALOGUE_STATUS") {
            Ok(value) if value.trim().is_empty() || value == "all" => None,
            Ok(value) => match ProductStatus::parse(value.trim()) {
                ProductStatus::Unknown => {
                    tracing::warn!(value = %value, "unsupported CATALOGUE_STATUS, using default");
                    defaults.load_status
                }
                status => Some(status),
            },
            Err(_) => defaults.load_status,
        };
        let catalogue = CatalogueConfig {
            page_size: parsed_var::<usize>("CATALOGUE_PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(defaults.page_size),
            search_debounce: parsed_var("SEARCH_DEBOUNCE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.search_debounce),
            load_status,
        };

        let limits = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            per_minute: parsed_var("RATE_LIMIT_PER_MINUTE").unwrap_or(limits.per_minute),
            per_hour: parsed_var("RATE_LIMIT_PER_HOUR").unwrap_or(limits.per_hour),
            per_day: parsed_var("RATE_LIMIT_PER_DAY").unwrap_or(limits.per_day),
            trust_forwarded_for: parsed_var("TRUST_FORWARDED_FOR")
                .unwrap_or(limits.trust_forwarded_for),
        };

        Ok(Self {
            host,
            port,
            products_path,
            catalogue,
            rate_limit,
        })
    }
}

fn parsed_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}
