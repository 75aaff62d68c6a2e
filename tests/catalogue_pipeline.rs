mod support;

use catalogue_api::{
    catalogue::{
        FilterState, PageButton, SortKey, filter_products, page_window, paginate,
        parse_price_range, run_pipeline, sort_products, total_pages,
    },
    error::CatalogueError,
    models::ProductStatus,
};
use support::{furniture, numbered, product};

fn unfiltered() -> FilterState {
    FilterState {
        sort: None,
        ..FilterState::default()
    }
}

fn ids(products: &[catalogue_api::models::Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn empty_filters_keep_every_product_in_order() {
    let products = numbered(7);
    assert_eq!(filter_products(&products, &FilterState::default()), products);
    assert!(filter_products(&[], &FilterState::default()).is_empty());
}

#[test]
fn status_filter_keeps_only_published() {
    let filters = FilterState {
        status: "published".into(),
        ..unfiltered()
    };
    let result = filter_products(&furniture(), &filters);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Sofá Lisboa");
}

#[test]
fn search_matches_name_or_code_case_insensitively() {
    let by_name = FilterState {
        search: "mesa".into(),
        ..unfiltered()
    };
    assert_eq!(ids(&filter_products(&furniture(), &by_name)), ["mesa"]);

    let by_code = FilterState {
        search: "mes0".into(),
        ..unfiltered()
    };
    assert_eq!(ids(&filter_products(&furniture(), &by_code)), ["mesa"]);

    let upper = FilterState {
        search: "SOFÁ".into(),
        ..unfiltered()
    };
    assert_eq!(ids(&filter_products(&furniture(), &upper)), ["sofa"]);
}

#[test]
fn category_must_match_exactly() {
    let filters = FilterState {
        category: "sofa".into(),
        ..unfiltered()
    };
    assert!(filter_products(&furniture(), &filters).is_empty());

    let filters = FilterState {
        category: "sofas".into(),
        ..unfiltered()
    };
    assert_eq!(ids(&filter_products(&furniture(), &filters)), ["sofa"]);
}

#[test]
fn price_bounds_are_inclusive_and_exclude_unpriced() {
    let products = vec![
        product("a", "A", Some(100.0), ProductStatus::Published),
        product("b", "B", None, ProductStatus::Published),
        product("c", "C", Some(500.0), ProductStatus::Published),
        product("d", "D", Some(1000.0), ProductStatus::Published),
    ];

    let min_only = FilterState {
        price_min: Some(0.0),
        ..unfiltered()
    };
    assert_eq!(ids(&filter_products(&products, &min_only)), ["a", "c", "d"]);

    let max_only = FilterState {
        price_max: Some(500.0),
        ..unfiltered()
    };
    assert_eq!(ids(&filter_products(&products, &max_only)), ["a", "c"]);

    let both = FilterState {
        price_min: Some(500.0),
        price_max: Some(1000.0),
        ..unfiltered()
    };
    assert_eq!(ids(&filter_products(&products, &both)), ["c", "d"]);
}

#[test]
fn price_range_values_parse_like_the_select_box() {
    let range = parse_price_range("500-1000").unwrap();
    assert_eq!((range.min, range.max), (Some(500.0), Some(1000.0)));

    let open = parse_price_range("5000+").unwrap();
    assert_eq!((open.min, open.max), (Some(5000.0), None));

    let cleared = parse_price_range("").unwrap();
    assert_eq!((cleared.min, cleared.max), (None, None));

    let half = parse_price_range("abc-1000").unwrap();
    assert_eq!((half.min, half.max), (None, Some(1000.0)));

    assert!(matches!(
        parse_price_range("cheap"),
        Err(CatalogueError::InvalidInput(_))
    ));
}

#[test]
fn name_sort_ignores_accents_and_case() {
    let products = vec![
        product("1", "estante", None, ProductStatus::Published),
        product("2", "Évora", None, ProductStatus::Published),
        product("3", "Armário", None, ProductStatus::Published),
        product("4", "banco", None, ProductStatus::Published),
    ];

    let asc = sort_products(&products, Some(SortKey::NameAsc));
    assert_eq!(ids(&asc), ["3", "4", "1", "2"]);

    let desc = sort_products(&products, Some(SortKey::NameDesc));
    assert_eq!(ids(&desc), ["2", "1", "4", "3"]);
}

#[test]
fn price_sort_treats_missing_price_as_zero_and_is_stable() {
    let products = vec![
        product("a", "A", Some(300.0), ProductStatus::Published),
        product("b", "B", None, ProductStatus::Published),
        product("c", "C", Some(0.0), ProductStatus::Published),
        product("d", "D", Some(50.0), ProductStatus::Published),
    ];

    assert_eq!(
        ids(&sort_products(&products, Some(SortKey::PriceAsc))),
        ["b", "c", "d", "a"]
    );
    assert_eq!(
        ids(&sort_products(&products, Some(SortKey::PriceDesc))),
        ["a", "d", "b", "c"]
    );
}

#[test]
fn date_sort_orders_by_creation_instant() {
    let products = numbered(4);
    assert_eq!(
        ids(&sort_products(&products, Some(SortKey::DateDesc))),
        ["04", "03", "02", "01"]
    );
    assert_eq!(
        ids(&sort_products(&products, Some(SortKey::DateAsc))),
        ["01", "02", "03", "04"]
    );
}

#[test]
fn unknown_sort_key_keeps_input_order() {
    assert_eq!(SortKey::parse("popularity"), None);
    let products = furniture();
    assert_eq!(sort_products(&products, None), products);
}

#[test]
fn sorting_is_idempotent_and_leaves_input_untouched() {
    let products = vec![
        product("x", "Zeta", Some(10.0), ProductStatus::Published),
        product("y", "alpha", Some(10.0), ProductStatus::Published),
        product("z", "Alpha", None, ProductStatus::Published),
    ];
    let snapshot = products.clone();

    for key in [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::DateAsc,
        SortKey::DateDesc,
    ] {
        let once = sort_products(&products, Some(key));
        assert_eq!(sort_products(&once, Some(key)), once, "{}", key.as_str());
    }
    assert_eq!(products, snapshot);
}

#[test]
fn pages_reconstruct_the_list_exactly_once() {
    let products = run_pipeline(&numbered(25), &FilterState::default());
    let pages = total_pages(products.len(), 12);
    assert_eq!(pages, 3);

    let rebuilt: Vec<_> = (1..=pages)
        .flat_map(|page| paginate(&products, page, 12).to_vec())
        .collect();
    assert_eq!(rebuilt, products);

    assert_eq!(paginate(&products, 3, 12).len(), 1);
    assert!(paginate(&products, 4, 12).is_empty());
}

fn numbers(buttons: &[PageButton]) -> Vec<String> {
    buttons
        .iter()
        .map(|button| match button {
            PageButton::Page { number, current: true } => format!("[{number}]"),
            PageButton::Page { number, .. } => number.to_string(),
            PageButton::Ellipsis => "...".to_string(),
        })
        .collect()
}

#[test]
fn page_window_centres_on_current_page() {
    assert_eq!(numbers(&page_window(1, 3)), ["[1]", "2", "3"]);
    assert_eq!(numbers(&page_window(1, 10)), ["[1]", "2", "3", "4", "5", "...", "10"]);
    assert_eq!(
        numbers(&page_window(6, 10)),
        ["1", "...", "4", "5", "[6]", "7", "8", "...", "10"]
    );
    assert_eq!(numbers(&page_window(4, 10)), ["1", "2", "3", "[4]", "5", "6", "...", "10"]);
    assert_eq!(numbers(&page_window(10, 10)), ["1", "...", "6", "7", "8", "9", "[10]"]);
    assert!(page_window(1, 0).is_empty());
}
