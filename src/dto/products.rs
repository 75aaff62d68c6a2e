use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    format::{DateStyle, format_date, format_price, slugify, status_label},
    models::Product,
};

const SLUG_MAX_LEN: usize = 100;

/// Product page payload: the record plus its display strings.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: Product,
    pub slug: String,
    pub price_label: String,
    pub status_label: String,
    pub published_label: Option<String>,
}

impl From<Product> for ProductDetail {
    fn from(product: Product) -> Self {
        Self {
            slug: slugify(&product.name, SLUG_MAX_LEN),
            price_label: format_price(product.price),
            status_label: status_label(product.status).to_string(),
            published_label: product
                .created_at
                .as_ref()
                .map(|date| format_date(date, DateStyle::Long)),
            product,
        }
    }
}
