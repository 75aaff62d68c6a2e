use axum::Router;

use crate::state::AppState;

pub mod catalogue;
pub mod doc;
pub mod health;
pub mod params;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/catalogue", catalogue::router())
        .nest("/products", products::router())
}
