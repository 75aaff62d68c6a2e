use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    catalogue::{FilterState, PageButton, RenderModel, SortKey, View},
    dto::products::ProductDetail,
    models::{Product, ProductImage, ProductStatus},
    response::{ApiResponse, Meta},
    routes::{catalogue, health, params, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        catalogue::list_catalogue,
        products::get_product,
    ),
    components(
        schemas(
            Product,
            ProductImage,
            ProductStatus,
            ProductDetail,
            FilterState,
            SortKey,
            PageButton,
            View,
            RenderModel,
            params::CatalogueQuery,
            health::HealthData,
            Meta,
            ApiResponse<RenderModel>,
            ApiResponse<ProductDetail>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalogue", description = "Filtered, sorted and paginated catalogue"),
        (name = "Products", description = "Product endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
