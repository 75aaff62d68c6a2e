use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Draft,
    Published,
    OutOfStock,
    #[serde(other)]
    Unknown,
}

impl ProductStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "draft" => ProductStatus::Draft,
            "published" => ProductStatus::Published,
            "out_of_stock" => ProductStatus::OutOfStock,
            _ => ProductStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Published => "published",
            ProductStatus::OutOfStock => "out_of_stock",
            ProductStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductImage {
    pub url: String,
    pub alt: String,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub code: String,
    pub category: String,
    pub price: Option<f64>,
    pub status: ProductStatus,
    pub images: Vec<ProductImage>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Builds a product from a raw catalogue record, defaulting malformed
    /// fields. Returns `None` when the record has no usable id.
    pub fn from_record(record: &Value) -> Option<Product> {
        let Some(fields) = record.as_object() else {
            tracing::warn!("skipping catalogue record that is not an object");
            return None;
        };

        let id = match fields.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                tracing::warn!("skipping catalogue record without id");
                return None;
            }
        };

        let product = Product {
            name: text_field(fields, &id, "name"),
            code: text_field(fields, &id, "code"),
            category: text_field(fields, &id, "category"),
            price: price_field(fields, &id),
            status: status_field(fields, &id),
            images: images_field(fields, &id),
            created_at: timestamp_field(fields, &id, "created_at"),
            id,
        };
        Some(product)
    }

    pub fn main_image(&self) -> Option<&ProductImage> {
        self.images.first()
    }
}

fn text_field(fields: &Map<String, Value>, id: &str, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        other => {
            tracing::warn!(product_id = %id, field = key, value = ?other, "defaulting product field to empty string");
            String::new()
        }
    }
}

fn price_field(fields: &Map<String, Value>, id: &str) -> Option<f64> {
    let raw = match fields.get("price") {
        None | Some(Value::Null) => return None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return None,
        Some(Value::String(s)) => s.trim().replace(',', ".").parse::<f64>().ok(),
        Some(_) => None,
    };
    match raw {
        Some(price) if price.is_finite() && price >= 0.0 => Some(price),
        _ => {
            tracing::warn!(product_id = %id, value = ?fields.get("price"), "dropping invalid product price");
            None
        }
    }
}

fn status_field(fields: &Map<String, Value>, id: &str) -> ProductStatus {
    let status = match fields.get("status") {
        Some(Value::String(s)) => ProductStatus::parse(s),
        _ => ProductStatus::Unknown,
    };
    if status == ProductStatus::Unknown {
        tracing::warn!(product_id = %id, value = ?fields.get("status"), "unrecognised product status");
    }
    status
}

fn images_field(fields: &Map<String, Value>, id: &str) -> Vec<ProductImage> {
    let Some(entries) = fields.get("images").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut images: Vec<ProductImage> = entries
        .iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            let url = entry.get("url").and_then(Value::as_str).unwrap_or_default();
            if url.is_empty() {
                tracing::warn!(product_id = %id, position, "skipping product image without url");
                return None;
            }
            let order = entry
                .get("order")
                .and_then(Value::as_u64)
                .and_then(|o| u32::try_from(o).ok())
                .unwrap_or(position as u32);
            Some(ProductImage {
                url: url.to_string(),
                alt: entry
                    .get("alt")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                order,
            })
        })
        .collect();
    images.sort_by_key(|image| image.order);
    images
}

fn timestamp_field(fields: &Map<String, Value>, id: &str, key: &str) -> Option<DateTime<Utc>> {
    let value = fields.get(key)?;
    let parsed = match value {
        Value::Null => return None,
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok(),
        Value::Number(n) => n.as_i64().and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        // Firestore exports timestamps as {seconds, nanoseconds}.
        Value::Object(ts) => {
            let secs = ts
                .get("seconds")
                .or_else(|| ts.get("_seconds"))
                .and_then(Value::as_i64);
            let nanos = ts
                .get("nanoseconds")
                .or_else(|| ts.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            secs.and_then(|s| Utc.timestamp_opt(s, nanos).single())
        }
        _ => None,
    };
    if parsed.is_none() {
        tracing::warn!(product_id = %id, field = key, value = ?value, "ignoring unparsable timestamp");
    }
    parsed
}
