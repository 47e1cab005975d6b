//! # Cart
//!
//! The cart value and its totals.
//!
//! ## Value Semantics
//! Every change produces a **new** `Cart`; the receiver is never modified.
//! Consumers holding an older snapshot (a rendered cart page, a header
//! badge) keep seeing exactly what they rendered, and comparing two
//! snapshots tells them whether anything changed.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  cart.with_product(p)      ──► [..items, p]           (append)          │
//! │  cart.with_amount(id, n)   ──► items[id].amount = n   (same order)      │
//! │  cart.without_product(id)  ──► items minus id         (same order)      │
//! │                                                                         │
//! │  All three validate first and return CoreError on violation.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Form
//! A cart serializes as a bare JSON array of products, the shape the
//! storefront has always written under `@RocketShoes:cart`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::{validate_amount, validate_items};

/// An ordered list of products, unique by id, each with amount >= 1.
///
/// ## Invariants
/// - Order is the order products were first added
/// - Ids are unique (adding an existing product changes its amount instead)
/// - Every amount is >= 1 (removal is the only way to drop below)
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from stored entries, checking every invariant.
    pub fn from_items(items: Vec<Product>) -> CoreResult<Self> {
        validate_items(&items)?;
        Ok(Cart { items })
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
    }

    /// Current amount of a product, 0 when absent.
    pub fn amount_of(&self, product_id: ProductId) -> i32 {
        self.find(product_id).map_or(0, |p| p.amount)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a new cart with `product` appended.
    ///
    /// ## Errors
    /// - `DuplicateProduct` if the id is already present
    /// - `Validation` if `product.amount < 1`
    pub fn with_product(&self, product: Product) -> CoreResult<Cart> {
        if self.contains(product.id) {
            return Err(CoreError::DuplicateProduct(product.id));
        }
        validate_amount(product.amount)?;

        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(product);
        Ok(Cart { items })
    }

    /// Returns a new cart with the amount of `product_id` replaced.
    ///
    /// ## Errors
    /// - `ProductNotInCart` if the id is absent
    /// - `Validation` if `amount < 1`
    pub fn with_amount(&self, product_id: ProductId, amount: i32) -> CoreResult<Cart> {
        validate_amount(amount)?;
        if !self.contains(product_id) {
            return Err(CoreError::ProductNotInCart(product_id));
        }

        let items = self
            .items
            .iter()
            .map(|p| {
                if p.id == product_id {
                    p.clone().with_amount(amount)
                } else {
                    p.clone()
                }
            })
            .collect();
        Ok(Cart { items })
    }

    /// Returns a new cart without `product_id`, others in original order.
    ///
    /// ## Errors
    /// - `ProductNotInCart` if the id is absent
    pub fn without_product(&self, product_id: ProductId) -> CoreResult<Cart> {
        if !self.contains(product_id) {
            return Err(CoreError::ProductNotInCart(product_id));
        }

        let items = self
            .items
            .iter()
            .filter(|p| p.id != product_id)
            .cloned()
            .collect();
        Ok(Cart { items })
    }

    /// Sum of all amounts.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|p| p.amount as i64).sum()
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> Money {
        self.items.iter().map(Product::subtotal).sum()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

/// Rejects persisted carts that break an invariant instead of loading them.
impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<Product>::deserialize(deserializer)?;
        Cart::from_items(items).map_err(serde::de::Error::custom)
    }
}

/// Cart summary for the header badge and the cart page footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products (the header badge).
    pub item_count: usize,
    /// Sum of all amounts.
    pub total_quantity: i64,
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId, price_cents: i64) -> Product {
        Product::new(id, format!("Tênis {}", id), Money::from_cents(price_cents), 1)
    }

    #[test]
    fn test_with_product_appends_in_order() {
        let cart = Cart::new()
            .with_product(product(3, 1000))
            .unwrap()
            .with_product(product(1, 2000))
            .unwrap();

        let ids: Vec<_> = cart.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_with_product_leaves_receiver_untouched() {
        let before = Cart::new().with_product(product(1, 1000)).unwrap();
        let after = before.with_product(product(2, 1000)).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_with_product_rejects_duplicates_and_zero_amounts() {
        let cart = Cart::new().with_product(product(1, 1000)).unwrap();

        assert_eq!(
            cart.with_product(product(1, 1000)),
            Err(CoreError::DuplicateProduct(1))
        );
        assert!(matches!(
            cart.with_product(product(2, 1000).with_amount(0)),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_with_amount() {
        let cart = Cart::new().with_product(product(1, 1000)).unwrap();

        let updated = cart.with_amount(1, 3).unwrap();
        assert_eq!(updated.amount_of(1), 3);
        assert_eq!(cart.amount_of(1), 1);

        assert_eq!(cart.with_amount(9, 3), Err(CoreError::ProductNotInCart(9)));
        assert!(matches!(cart.with_amount(1, 0), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_without_product_keeps_relative_order() {
        let cart = Cart::from_items(vec![product(1, 100), product(2, 100), product(3, 100)])
            .unwrap();

        let removed = cart.without_product(2).unwrap();
        let ids: Vec<_> = removed.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert_eq!(
            removed.without_product(2),
            Err(CoreError::ProductNotInCart(2))
        );
    }

    #[test]
    fn test_totals() {
        let cart = Cart::from_items(vec![
            product(1, 17990).with_amount(2),
            product(2, 13990),
        ])
        .unwrap();

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.total.cents(), 49970);
        assert_eq!(totals.total.to_string(), "R$ 499,70");
    }

    #[test]
    fn test_persisted_form_is_a_bare_array() {
        let cart = Cart::new().with_product(product(1, 17990)).unwrap();
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(
            json,
            r#"[{"id":1,"title":"Tênis 1","price":179.9,"image":"","amount":1}]"#
        );

        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_deserialize_rejects_broken_invariants() {
        let zero = r#"[{"id":1,"title":"A","price":1.0,"amount":0}]"#;
        assert!(serde_json::from_str::<Cart>(zero).is_err());

        let duplicate = r#"[{"id":1,"title":"A","price":1.0,"amount":1},
                            {"id":1,"title":"A","price":1.0,"amount":2}]"#;
        assert!(serde_json::from_str::<Cart>(duplicate).is_err());
    }
}
