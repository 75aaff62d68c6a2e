mod support;

use catalogue_api::{
    catalogue::{CatalogueController, Phase, SortKey, View},
    error::CatalogueError,
    models::ProductStatus,
};
use support::{furniture, numbered, product};

fn ready_with(products: Vec<catalogue_api::models::Product>) -> CatalogueController {
    let mut controller = CatalogueController::new(12);
    let ticket = controller.begin_load();
    assert!(controller.complete_load(ticket, Ok(products)));
    controller
}

#[test]
fn starts_idle_and_loads_into_ready() {
    let mut controller = CatalogueController::new(12);
    assert_eq!(controller.view(), View::Idle);

    let ticket = controller.begin_load();
    assert_eq!(*controller.phase(), Phase::Loading);
    let loading = controller.render();
    assert!(loading.is_loading);
    assert!(loading.items.is_empty());

    assert!(controller.complete_load(ticket, Ok(numbered(25))));
    let view = controller.render();
    assert_eq!(view.view, View::Results);
    assert_eq!(view.total_count, 25);
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.current_page, 1);
    assert_eq!(view.items.len(), 12);
    assert_eq!(view.results_label, "25 produits trouvés");
    assert!(!view.is_loading);
}

#[test]
fn failed_load_exposes_error_and_retry_recovers() {
    let mut controller = CatalogueController::new(12);
    let ticket = controller.begin_load();
    controller.complete_load(
        ticket,
        Err(CatalogueError::DataUnavailable("permission denied".into())),
    );

    let view = controller.render();
    assert!(view.is_error);
    assert_eq!(view.view, View::Error);
    assert!(view.error_message.unwrap().contains("permission denied"));

    let retry = controller.begin_load();
    assert!(controller.complete_load(retry, Ok(furniture())));
    assert_eq!(controller.view(), View::Results);
    assert!(!controller.render().is_error);
}

#[test]
fn stale_load_is_ignored() {
    let mut controller = CatalogueController::new(12);
    let first = controller.begin_load();
    let second = controller.begin_load();

    assert!(controller.complete_load(second, Ok(furniture())));
    assert!(!controller.complete_load(first, Ok(numbered(25))));
    assert_eq!(controller.render().total_count, 2);
}

#[test]
fn page_navigation_ignores_out_of_range_and_current_page() {
    let mut controller = ready_with(numbered(25));
    let before = controller.revision();

    assert!(!controller.go_to_page(4));
    assert!(!controller.go_to_page(0));
    assert!(!controller.go_to_page(1));
    assert_eq!(controller.revision(), before);

    assert!(controller.go_to_page(2));
    let view = controller.render();
    assert_eq!(view.current_page, 2);
    let names: Vec<_> = view.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names.first(), Some(&"Item 13"));
    assert_eq!(names.last(), Some(&"Item 24"));
    assert_eq!(names.len(), 12);
    assert!(view.has_previous && view.has_next);

    assert!(controller.next_page());
    assert_eq!(controller.current_items().len(), 1);
    assert!(!controller.next_page());
    assert!(controller.previous_page());
    assert_eq!(controller.page().current_page, 2);
}

#[test]
fn filter_changes_reset_to_first_page() {
    let mut controller = ready_with(numbered(25));
    controller.go_to_page(3);

    controller.set_price_filter(Some(50.0), None);
    assert_eq!(controller.page().current_page, 1);
    assert_eq!(controller.render().total_count, 21);

    controller.go_to_page(2);
    controller.set_sort_key(Some(SortKey::PriceDesc));
    assert_eq!(controller.page().current_page, 1);
    assert_eq!(controller.current_items()[0].name, "Item 25");
}

#[test]
fn empty_results_switch_to_no_results_view() {
    let mut controller = ready_with(furniture());
    controller.apply_search("  armoire ");
    assert_eq!(controller.filters().search, "armoire");
    let view = controller.render();
    assert_eq!(view.view, View::NoResults);
    assert_eq!(view.total_pages, 0);
    assert!(view.page_buttons.is_empty());
    assert_eq!(view.results_label, "Aucun produit trouvé");

    controller.clear_search();
    assert_eq!(controller.view(), View::Results);
}

#[test]
fn filters_set_while_loading_apply_on_completion() {
    let mut controller = CatalogueController::new(12);
    let ticket = controller.begin_load();
    controller.set_status_filter("published");
    controller.set_category_filter("sofas");
    controller.complete_load(ticket, Ok(furniture()));

    let view = controller.render();
    assert_eq!(view.total_count, 1);
    assert_eq!(view.items[0].id, "sofa");
}

#[test]
fn invalid_inputs_are_ignored_or_defaulted() {
    let mut controller = ready_with(vec![
        product("a", "A", Some(100.0), ProductStatus::Published),
        product("b", "B", None, ProductStatus::Published),
    ]);

    controller.set_price_range("500-1000");
    assert_eq!(controller.filters().price_min, Some(500.0));

    controller.set_price_range("not a range");
    assert_eq!(controller.filters().price_min, Some(500.0));
    assert_eq!(controller.filters().price_max, Some(1000.0));

    controller.set_price_filter(Some(-5.0), Some(f64::NAN));
    assert_eq!(controller.filters().price_min, None);
    assert_eq!(controller.filters().price_max, None);
    assert_eq!(controller.render().total_count, 2);

    controller.set_sort("cheapest-first");
    assert_eq!(controller.filters().sort, None);
    let ids: Vec<_> = controller.current_items().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn reset_restores_default_filters() {
    let mut controller = ready_with(furniture());
    controller.apply_search("mesa");
    controller.set_sort("price-desc");
    controller.set_status_filter("draft");
    controller.reset_filters();

    let filters = controller.filters();
    assert!(filters.search.is_empty());
    assert!(filters.status.is_empty());
    assert_eq!(filters.sort, Some(SortKey::NameAsc));
    assert_eq!(controller.render().total_count, 2);
}

#[test]
fn reload_from_a_later_page_renders_a_consistent_model() {
    let mut controller = ready_with(numbered(25));
    assert!(controller.go_to_page(3));

    let ticket = controller.begin_load();
    let loading = controller.render();
    assert!(loading.is_loading);
    assert_eq!(loading.current_page, 1);
    assert!(loading.current_page <= loading.total_pages.max(1));
    assert_eq!(loading.total_count, 0);
    assert!(loading.items.is_empty());
    assert!(!loading.has_previous && !loading.has_next);

    controller.complete_load(ticket, Err(CatalogueError::DataUnavailable("timeout".into())));
    let failed = controller.render();
    assert_eq!(failed.current_page, 1);
    assert_eq!(failed.total_count, 0);
    assert!(failed.current_page <= failed.total_pages.max(1));
}
