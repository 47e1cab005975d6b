//! # Domain Types
//!
//! Types exchanged with the catalog API and the storefront UI.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │     Stock       │   │ UpdateProductAmount │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  productId          │   │
//! │  │  title, image   │   │  amount         │   │  amount             │   │
//! │  │  price (Money)  │   │  (available)    │   │                     │   │
//! │  │  amount (cart)  │   └─────────────────┘   └─────────────────────┘   │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │     Notice      │──►│  Notification   │  (what the UI toasts)       │
//! │  │  StockExceeded  │   │  notice         │                             │
//! │  │  AddFailed ...  │   │  message        │                             │
//! │  └─────────────────┘   │  raised_at      │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

/// Catalog identifier of a product.
pub type ProductId = u32;

// =============================================================================
// Product
// =============================================================================

/// A catalog product, plus the quantity held in the cart.
///
/// ## Wire Format
/// ```json
/// { "id": 1, "title": "Tênis de Caminhada", "price": 179.9, "image": "https://..." }
/// ```
/// `GET /products/{id}` omits `amount`; it defaults to 0 until the product
/// enters a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price. Decimal on the wire, centavos in memory.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    /// Image URL shown on the product card.
    #[serde(default)]
    pub image: String,

    /// Quantity held in the cart (>= 1 for every cart entry).
    #[serde(default)]
    pub amount: i32,
}

impl Product {
    /// Creates a product with no image.
    pub fn new(id: ProductId, title: impl Into<String>, price: Money, amount: i32) -> Self {
        Product {
            id,
            title: title.into(),
            price,
            image: String::new(),
            amount,
        }
    }

    /// Returns a copy holding the given cart amount.
    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }

    /// Line subtotal (unit price × amount).
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.price * self.amount
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Quantity of a product the store can currently sell.
///
/// Not owned by the cart; fetched on demand before every quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stock {
    pub id: ProductId,
    pub amount: i32,
}

impl Stock {
    /// Checks whether `requested` units can be held in a cart.
    #[inline]
    pub fn allows(&self, requested: i32) -> bool {
        requested <= self.amount
    }
}

// =============================================================================
// Update Request
// =============================================================================

/// Argument of `update_product_amount`: the target amount for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i32,
}

// =============================================================================
// Notices
// =============================================================================

/// A user-facing message raised by a cart operation.
///
/// Cart operations never return errors to the UI; they raise one of these
/// and leave the cart untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The requested amount is above the available stock.
    StockExceeded { product_id: ProductId },

    /// Adding a product failed (catalog unreachable, unknown product, ...).
    AddFailed { product_id: ProductId },

    /// The product to remove is not in the cart, or the removal could not
    /// be persisted.
    RemoveFailed { product_id: ProductId },

    /// Changing an amount failed for a reason other than stock.
    UpdateFailed { product_id: ProductId },
}

impl Notice {
    /// The product the notice concerns.
    pub fn product_id(&self) -> ProductId {
        match *self {
            Notice::StockExceeded { product_id }
            | Notice::AddFailed { product_id }
            | Notice::RemoveFailed { product_id }
            | Notice::UpdateFailed { product_id } => product_id,
        }
    }

    /// Text shown to the shopper.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::StockExceeded { .. } => "Requested quantity exceeds available stock",
            Notice::AddFailed { .. } => "Error adding product",
            Notice::RemoveFailed { .. } => "Error removing product",
            Notice::UpdateFailed { .. } => "Error updating product amount",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A notice as delivered to the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notice: Notice,
    pub message: String,
    #[ts(as = "String")]
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    /// Stamps a notice with the current time.
    pub fn new(notice: Notice) -> Self {
        Notification {
            notice,
            message: notice.message().to_string(),
            raised_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_catalog_json() {
        let json = r#"{
            "id": 2,
            "title": "Tênis VR Caminhada Confortável",
            "price": 139.9,
            "image": "https://example.com/tenis2.jpg"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 2);
        assert_eq!(product.price.cents(), 13990);
        assert_eq!(product.amount, 0);
    }

    #[test]
    fn test_product_subtotal() {
        let product = Product::new(1, "Tênis", Money::from_cents(17990), 3);
        assert_eq!(product.subtotal().cents(), 53970);
        assert_eq!(product.clone().with_amount(1).subtotal().cents(), 17990);
    }

    #[test]
    fn test_stock_allows() {
        let stock = Stock { id: 1, amount: 3 };
        assert!(stock.allows(3));
        assert!(!stock.allows(4));
    }

    #[test]
    fn test_update_request_uses_camel_case() {
        let request: UpdateProductAmount =
            serde_json::from_str(r#"{"productId": 7, "amount": 2}"#).unwrap();
        assert_eq!(request, UpdateProductAmount { product_id: 7, amount: 2 });
    }

    #[test]
    fn test_notice_messages() {
        let notice = Notice::StockExceeded { product_id: 4 };
        assert_eq!(notice.to_string(), "Requested quantity exceeds available stock");
        assert_eq!(notice.product_id(), 4);

        let json = serde_json::to_value(Notice::RemoveFailed { product_id: 9 }).unwrap();
        assert_eq!(json["kind"], "remove_failed");
        assert_eq!(json["product_id"], 9);
    }

    #[test]
    fn test_notification_carries_message() {
        let notification = Notification::new(Notice::AddFailed { product_id: 1 });
        assert_eq!(notification.message, "Error adding product");
    }
}
