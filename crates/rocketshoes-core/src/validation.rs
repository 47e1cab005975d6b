//! # Validation Module
//!
//! Stock and amount rules shared by every cart operation.
//!
//! ## Where Rules Apply
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  add_product / update_product_amount                                   │
//! │  └── ensure_in_stock(requested, stock)   before any state change       │
//! │                                                                         │
//! │  Cart::with_product / Cart::with_amount                                │
//! │  └── validate_amount(amount)             amount >= 1                   │
//! │                                                                         │
//! │  Loading a persisted cart                                               │
//! │  └── validate_items(items)               amounts >= 1, unique ids      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Product, ProductId, Stock};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a cart amount.
///
/// ```rust
/// use rocketshoes_core::validation::validate_amount;
///
/// assert!(validate_amount(1).is_ok());
/// assert!(validate_amount(0).is_err());
/// assert!(validate_amount(-2).is_err());
/// ```
pub fn validate_amount(amount: i32) -> ValidationResult<()> {
    if amount < 1 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
            value: amount as i64,
        });
    }

    Ok(())
}

/// Validates a list of cart entries: every amount >= 1 and ids unique.
pub fn validate_items(items: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        validate_amount(item.amount)?;

        if !seen.insert(item.id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: item.id.to_string(),
            });
        }
    }

    Ok(())
}

/// Checks a requested amount against the reported stock.
///
/// ```rust
/// use rocketshoes_core::{validation::ensure_in_stock, Stock};
///
/// let stock = Stock { id: 1, amount: 2 };
/// assert!(ensure_in_stock(1, 2, &stock).is_ok());
/// assert!(ensure_in_stock(1, 3, &stock).is_err());
/// ```
pub fn ensure_in_stock(product_id: ProductId, requested: i32, stock: &Stock) -> CoreResult<()> {
    if !stock.allows(requested) {
        return Err(CoreError::InsufficientStock {
            product_id,
            available: stock.amount,
            requested,
        });
    }

    Ok(())
}
