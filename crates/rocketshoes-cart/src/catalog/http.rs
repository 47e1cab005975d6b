//! HTTP catalog client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rocketshoes_core::{Product, ProductId, Stock};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::Catalog;
use crate::config::ApiSettings;
use crate::error::{CatalogError, CatalogResult};

/// Catalog backed by the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a client for `base_url` (e.g. `http://localhost:3333`).
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpCatalog {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client from the `[api]` config section.
    pub fn from_settings(settings: &ApiSettings) -> CatalogResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(HttpCatalog {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        entity: &'static str,
        resource: &str,
        id: ProductId,
    ) -> CatalogResult<T> {
        let url = format!("{}/{}/{}", self.base_url, resource, id);
        debug!(%url, "Catalog request");

        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(CatalogError::not_found(entity, id)),
            status if !status.is_success() => Err(CatalogError::Unavailable {
                url,
                status: status.as_u16(),
            }),
            _ => Ok(response.json::<T>().await?),
        }
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> CatalogResult<Product> {
        self.get_json("Product", "products", id).await
    }

    #[instrument(skip(self))]
    async fn stock(&self, id: ProductId) -> CatalogResult<Stock> {
        self.get_json("Stock", "stock", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode as AxumStatus;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn product_handler(Path(id): Path<u32>) -> impl IntoResponse {
        match id {
            1 => (
                AxumStatus::OK,
                Json(json!({ "id": 1, "title": "Tênis de Caminhada", "price": 179.9, "image": "a.jpg" })),
            )
                .into_response(),
            2 => (AxumStatus::OK, "not json").into_response(),
            _ => AxumStatus::NOT_FOUND.into_response(),
        }
    }

    async fn stock_handler(Path(id): Path<u32>) -> impl IntoResponse {
        match id {
            1 => (AxumStatus::OK, Json(json!({ "id": 1, "amount": 3 }))).into_response(),
            5 => AxumStatus::INTERNAL_SERVER_ERROR.into_response(),
            _ => AxumStatus::NOT_FOUND.into_response(),
        }
    }

    /// Starts a catalog server on an ephemeral port and returns its base URL.
    async fn spawn_catalog() -> String {
        let app = Router::new()
            .route("/products/{id}", get(product_handler))
            .route("/stock/{id}", get(stock_handler));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_fetches_product_and_stock() {
        let catalog = HttpCatalog::new(spawn_catalog().await);

        let product = catalog.product(1).await.unwrap();
        assert_eq!(product.title, "Tênis de Caminhada");
        assert_eq!(product.price.cents(), 17990);
        assert_eq!(product.amount, 0);

        let stock = catalog.stock(1).await.unwrap();
        assert_eq!(stock, Stock { id: 1, amount: 3 });
    }

    #[tokio::test]
    async fn test_maps_statuses_to_typed_errors() {
        let catalog = HttpCatalog::new(spawn_catalog().await);

        assert!(matches!(
            catalog.product(99).await,
            Err(CatalogError::NotFound { entity: "Product", id: 99 })
        ));
        assert!(matches!(
            catalog.stock(5).await,
            Err(CatalogError::Unavailable { status: 500, .. })
        ));
        assert!(matches!(catalog.product(2).await, Err(CatalogError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        // Bind then drop so the port is (almost certainly) closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let catalog = HttpCatalog::new(format!("http://{}", addr));
        assert!(matches!(
            catalog.stock(1).await,
            Err(CatalogError::Transport(_))
        ));
    }

    #[test]
    fn test_base_url_is_normalized() {
        let settings = ApiSettings {
            base_url: "http://localhost:3333/".to_string(),
            timeout_secs: Some(5),
        };
        let catalog = HttpCatalog::from_settings(&settings).unwrap();
        assert_eq!(catalog.base_url(), "http://localhost:3333");
    }
}
