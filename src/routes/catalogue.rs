use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    catalogue::{CatalogueController, RenderModel},
    error::AppResult,
    response::{ApiResponse, Meta},
    routes::params::CatalogueQuery,
    source::{LoadFilter, ProductSource},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_catalogue))
}

#[utoipa::path(
    get,
    path = "/api/catalogue",
    params(
        ("q" = Option<String>, Query, description = "Search in product name and code"),
        ("category" = Option<String>, Query, description = "Exact category"),
        ("price" = Option<String>, Query, description = "Price range, e.g. 500-1000 or 5000+"),
        ("price_min" = Option<String>, Query, description = "Lower price bound"),
        ("price_max" = Option<String>, Query, description = "Upper price bound"),
        ("status" = Option<String>, Query, description = "draft, published or out_of_stock"),
        ("sort" = Option<String>, Query, description = "name-asc, name-desc, price-asc, price-desc, date-asc, date-desc"),
        ("page" = Option<usize>, Query, description = "Page number, default 1"),
        ("per_page" = Option<usize>, Query, description = "Items per page, default 12"),
    ),
    responses(
        (status = 200, description = "Catalogue page", body = ApiResponse<RenderModel>),
        (status = 503, description = "Catalogue data unavailable"),
    ),
    tag = "Catalogue"
)]
pub async fn list_catalogue(
    State(state): State<AppState>,
    Query(query): Query<CatalogueQuery>,
) -> AppResult<Json<ApiResponse<RenderModel>>> {
    let filters = query.filter_state();
    let page_size = query.page_size(state.catalogue.page_size);

    let products = state
        .source
        .load_products(LoadFilter {
            status: state.catalogue.load_status,
        })
        .await?;

    let mut controller = CatalogueController::from_snapshot(products.into(), filters, page_size);
    let last_page = controller.page().total_pages().max(1);
    controller.go_to_page(query.page.unwrap_or(1).clamp(1, last_page));

    let view = controller.render();
    let meta = Meta::new(view.current_page, view.page_size, view.total_count, view.total_pages);
    Ok(Json(ApiResponse::success("Catalogue", view, Some(meta))))
}
