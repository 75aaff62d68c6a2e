use std::{collections::HashSet, future::Future, path::PathBuf};

use serde_json::Value;

use crate::{
    error::CatalogueError,
    models::{Product, ProductStatus},
};

/// Server-side narrowing requested by the catalogue when loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadFilter {
    pub status: Option<ProductStatus>,
}

/// Data-loading collaborator of the catalogue.
pub trait ProductSource: Send + Sync {
    fn load_products(
        &self,
        filter: LoadFilter,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogueError>> + Send;

    fn find_product(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Product>, CatalogueError>> + Send {
        async move {
            let products = self.load_products(LoadFilter::default()).await?;
            Ok(products.into_iter().find(|product| product.id == id))
        }
    }
}

/// Reads the catalogue from a JSON export on every load.
///
/// The file holds either an array of product records or an object with a
/// `products` array.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProductSource for JsonFileSource {
    async fn load_products(&self, filter: LoadFilter) -> Result<Vec<Product>, CatalogueError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            CatalogueError::DataUnavailable(format!("reading {}: {err}", self.path.display()))
        })?;
        let document: Value = serde_json::from_str(&raw).map_err(|err| {
            CatalogueError::DataUnavailable(format!("parsing {}: {err}", self.path.display()))
        })?;

        let records = match &document {
            Value::Array(records) => records.as_slice(),
            Value::Object(fields) => match fields.get("products") {
                Some(Value::Array(records)) => records.as_slice(),
                _ => {
                    return Err(CatalogueError::DataUnavailable(
                        "catalogue export has no products array".into(),
                    ));
                }
            },
            _ => {
                return Err(CatalogueError::DataUnavailable(
                    "catalogue export is not a list".into(),
                ));
            }
        };

        let products = records.iter().filter_map(Product::from_record);
        Ok(select(products, filter))
    }
}

/// Fixed product list, used by the seed tooling and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    products: Vec<Product>,
}

impl InMemorySource {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl ProductSource for InMemorySource {
    async fn load_products(&self, filter: LoadFilter) -> Result<Vec<Product>, CatalogueError> {
        Ok(select(self.products.iter().cloned(), filter))
    }
}

fn select(products: impl IntoIterator<Item = Product>, filter: LoadFilter) -> Vec<Product> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|product| {
            if seen.insert(product.id.clone()) {
                true
            } else {
                tracing::warn!(product_id = %product.id, "dropping duplicate product id");
                false
            }
        })
        .filter(|product| filter.status.is_none_or(|status| product.status == status))
        .collect()
}

/// Source selected at startup; keeps the HTTP state non-generic.
#[derive(Debug, Clone)]
pub enum CatalogueSource {
    File(JsonFileSource),
    Memory(InMemorySource),
}

impl ProductSource for CatalogueSource {
    async fn load_products(&self, filter: LoadFilter) -> Result<Vec<Product>, CatalogueError> {
        match self {
            CatalogueSource::File(source) => source.load_products(filter).await,
            CatalogueSource::Memory(source) => source.load_products(filter).await,
        }
    }
}
