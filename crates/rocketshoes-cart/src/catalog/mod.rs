//! # Catalog
//!
//! Remote product and stock lookups used by the cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Catalog Sources                                │
//! │                                                                         │
//! │  trait Catalog                                                          │
//! │  ├── HttpCatalog     GET {base}/products/{id}, GET {base}/stock/{id}    │
//! │  └── FixtureCatalog  json-server style db file, served from memory      │
//! │                                                                         │
//! │  Both return CatalogError on failure; nothing resolves to "empty".     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod fixture;
mod http;

pub use fixture::FixtureCatalog;
pub use http::HttpCatalog;

use async_trait::async_trait;
use rocketshoes_core::{Product, ProductId, Stock};

use crate::error::CatalogResult;

/// Source of product data and available stock.
///
/// Calls are the only suspension points of a cart operation.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Full product data. `amount` is 0 on the returned value.
    async fn product(&self, id: ProductId) -> CatalogResult<Product>;

    /// Quantity currently available for sale.
    async fn stock(&self, id: ProductId) -> CatalogResult<Stock>;
}
