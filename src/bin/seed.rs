use std::path::PathBuf;

use catalogue_api::{
    config::AppConfig,
    models::{Product, ProductImage, ProductStatus},
};
use chrono::{Duration, Utc};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or(config.products_path);

    let products = demo_products();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let body = serde_json::to_string_pretty(&serde_json::json!({ "products": products }))?;
    tokio::fs::write(&path, body).await?;

    println!("Seeded {} products into {}", products.len(), path.display());
    Ok(())
}

fn demo_products() -> Vec<Product> {
    let catalogue = [
        ("Sofá Lisboa", "sofas", Some(500.0), ProductStatus::Published),
        ("Mesa Porto", "tables", Some(1200.0), ProductStatus::Published),
        ("Cadeira Braga", "chairs", Some(149.9), ProductStatus::Published),
        ("Armário Faro", "storage", Some(890.0), ProductStatus::OutOfStock),
        ("Cama Coimbra", "beds", Some(1450.0), ProductStatus::Published),
        ("Estante Évora", "storage", None, ProductStatus::Published),
        ("Aparador Sintra", "storage", Some(620.0), ProductStatus::Draft),
        ("Poltrona Aveiro", "sofas", Some(380.0), ProductStatus::Published),
    ];

    let now = Utc::now();
    catalogue
        .into_iter()
        .enumerate()
        .map(|(i, (name, category, price, status))| Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            code: product_code(name, i),
            category: category.to_string(),
            price,
            status,
            images: vec![ProductImage {
                url: format!("/assets/images/products/{}.jpg", i + 1),
                alt: name.to_string(),
                order: 0,
            }],
            created_at: Some(now - Duration::days(i as i64 * 7)),
        })
        .collect()
}

/// `FAT` prefix, up to three initials and a three-digit serial.
fn product_code(name: &str, serial: usize) -> String {
    let initials: String = name
        .split_whitespace()
        .take(3)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    format!("FAT{initials}{:03}", (serial + 1) % 1000)
}
