//! # Cart Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  reqwest::Error ──► CatalogError ─┐                                     │
//! │  io / serde     ──► StorageError ─┼──► StoreError ──► Notice ──► UI     │
//! │  CoreError ───────────────────────┘        │                            │
//! │                                            └──► tracing::error!         │
//! │                                                                         │
//! │  StoreError never leaves CartStore: operations return ().              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use rocketshoes_core::{CoreError, ProductId};
use thiserror::Error;

// =============================================================================
// Catalog Errors
// =============================================================================

/// Remote catalog lookup failures.
///
/// A failed lookup is always one of these; it never resolves to an empty
/// product or stock value.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog has no such entity (HTTP 404, or missing from a fixture).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: ProductId },

    /// The catalog answered with a non-success status.
    #[error("Catalog unavailable: {url} returned {status}")]
    Unavailable { url: String, status: u16 },

    /// The request never got an answer (connection refused, timeout, ...).
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// The response body was not the expected JSON.
    #[error("Invalid catalog response: {0}")]
    Decode(String),

    /// A local fixture file could not be read.
    #[error("Cannot read catalog fixture {}: {source}", path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: ProductId) -> Self {
        CatalogError::NotFound { entity, id }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Storage Errors
// =============================================================================

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON object of string values.
    #[error("Storage file is corrupt: {0}")]
    CorruptStore(String),

    /// The stored cart cannot be decoded or breaks a cart invariant.
    #[error("Stored cart under '{key}' is invalid: {reason}")]
    InvalidCart { key: String, reason: String },

    #[error("Failed to serialize cart: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Config Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Store Error
// =============================================================================

/// Everything that can abort a cart operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// True for the stock rule, which is an expected business outcome
    /// rather than a failure.
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::InsufficientStock { .. }))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_messages() {
        assert_eq!(
            CatalogError::not_found("Product", 7).to_string(),
            "Product not found: 7"
        );
        let err = CatalogError::Unavailable {
            url: "http://localhost:3333/stock/1".to_string(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "Catalog unavailable: http://localhost:3333/stock/1 returned 500"
        );
    }

    #[test]
    fn test_store_error_classification() {
        let stock: StoreError = CoreError::InsufficientStock {
            product_id: 1,
            available: 1,
            requested: 2,
        }
        .into();
        assert!(stock.is_insufficient_stock());

        let missing: StoreError = CoreError::ProductNotInCart(1).into();
        assert!(!missing.is_insufficient_stock());

        let remote: StoreError = CatalogError::Transport("refused".into()).into();
        assert!(!remote.is_insufficient_stock());
    }
}
