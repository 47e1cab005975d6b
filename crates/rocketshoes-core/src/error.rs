//! # Error Types
//!
//! Domain-specific error types for rocketshoes-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocketshoes-core errors (this file)                                   │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Malformed amounts / carts                      │
//! │                                                                         │
//! │  rocketshoes-cart errors (separate crate)                              │
//! │  ├── CatalogError     - Remote lookup failures                         │
//! │  ├── StorageError     - Persistence failures                           │
//! │  └── StoreError       - Umbrella used by CartStore                     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → Notice → UI          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Requested amount is above the available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "+" (amount 3 → 4)
    ///      │
    ///      ▼
    /// GET /stock/1 → { amount: 3 }
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 1, available: 3, requested: 4 }
    ///      │
    ///      ▼
    /// UI toasts "Requested quantity exceeds available stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        available: i32,
        requested: i32,
    },

    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(ProductId),

    /// The product is already in the cart (carts hold one entry per id).
    #[error("Product {0} is already in the cart")]
    DuplicateProduct(ProductId),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: i64 },

    /// The same id appears twice in a persisted cart.
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
