//! In-memory catalogue pipeline: filter, sort and paginate a product
//! snapshot, plus the controller and runtime that drive it from UI events.

pub mod controller;
pub mod debounce;
pub mod filter;
pub mod paginate;
pub mod runtime;
pub mod sort;

pub use controller::{CatalogueController, LoadTicket, Phase, RenderModel, View};
pub use filter::{FilterState, PriceRange, filter_products, parse_price_range};
pub use paginate::{PageButton, PageState, page_window, paginate, total_pages};
pub use runtime::{CatalogueEvent, CatalogueHandle};
pub use sort::{SortKey, sort_products};

use crate::models::Product;

/// Filtered and sorted copy of `products` for `filters`.
pub fn run_pipeline(products: &[Product], filters: &FilterState) -> Vec<Product> {
    let filtered = filter_products(products, filters);
    sort_products(&filtered, filters.sort)
}
