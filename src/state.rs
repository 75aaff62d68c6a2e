use std::sync::Arc;

use crate::{config::CatalogueConfig, security::RateLimiter, source::CatalogueSource};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<CatalogueSource>,
    pub limiter: Arc<RateLimiter>,
    pub catalogue: CatalogueConfig,
}
