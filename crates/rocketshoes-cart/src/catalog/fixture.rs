//! In-memory catalog loaded from a json-server style database file.
//!
//! ## File Format
//! ```json
//! {
//!   "products": [{ "id": 1, "title": "Tênis de Caminhada", "price": 179.9, "image": "..." }],
//!   "stock":    [{ "id": 1, "amount": 3 }]
//! }
//! ```
//! This is the same file the storefront API is served from during
//! development, so demos and tests run against realistic data without a
//! server.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use rocketshoes_core::{Product, ProductId, Stock};
use serde::Deserialize;
use tracing::info;

use super::Catalog;
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Default, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<Stock>,
}

/// Catalog served from memory.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, Stock>,
}

impl FixtureCatalog {
    pub fn new(products: Vec<Product>, stock: Vec<Stock>) -> Self {
        FixtureCatalog {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            stock: stock.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let file: FixtureFile =
            serde_json::from_str(json).map_err(|e| CatalogError::Decode(e.to_string()))?;
        Ok(Self::new(file.products, file.stock))
    }

    pub fn from_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Fixture {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(
            ?path,
            products = catalog.products.len(),
            "Loaded fixture catalog"
        );
        Ok(catalog)
    }
}

#[async_trait]
impl Catalog for FixtureCatalog {
    async fn product(&self, id: ProductId) -> CatalogResult<Product> {
        self.products
            .get(&id)
            .map(|p| p.clone().with_amount(0))
            .ok_or_else(|| CatalogError::not_found("Product", id))
    }

    async fn stock(&self, id: ProductId) -> CatalogResult<Stock> {
        self.stock
            .get(&id)
            .copied()
            .ok_or_else(|| CatalogError::not_found("Stock", id))
    }
}
