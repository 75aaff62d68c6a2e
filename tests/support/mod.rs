#![allow(dead_code)]

use catalogue_api::models::{Product, ProductStatus};
use chrono::{TimeZone, Utc};

pub fn product(id: &str, name: &str, price: Option<f64>, status: ProductStatus) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        code: format!("C{id}"),
        category: String::new(),
        price,
        status,
        images: Vec::new(),
        created_at: None,
    }
}

/// `count` published products named `Item 01`, `Item 02`, ... in that order.
pub fn numbered(count: usize) -> Vec<Product> {
    (1..=count)
        .map(|i| {
            let mut p = product(
                &format!("{i:02}"),
                &format!("Item {i:02}"),
                Some(i as f64 * 10.0),
                ProductStatus::Published,
            );
            p.created_at = Utc.timestamp_opt(1_700_000_000 + i as i64 * 3600, 0).single();
            p
        })
        .collect()
}

pub fn furniture() -> Vec<Product> {
    let mut sofa = product("sofa", "Sofá Lisboa", Some(500.0), ProductStatus::Published);
    sofa.code = "SOF001".into();
    sofa.category = "sofas".into();
    sofa.created_at = Utc.with_ymd_and_hms(2024, 3, 12, 9, 30, 0).single();

    let mut table = product("mesa", "Mesa Porto", Some(1200.0), ProductStatus::Draft);
    table.code = "MES001".into();
    table.category = "tables".into();
    table.created_at = Utc.with_ymd_and_hms(2024, 5, 2, 14, 0, 0).single();

    vec![sofa, table]
}
