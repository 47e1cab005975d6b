//! # rocketshoes-core: Pure Domain Logic for the Rocket Shoes Cart
//!
//! Everything the cart *means*, with none of the I/O it *does*.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rocket Shoes Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Storefront UI / CLI                           │   │
//! │  │    Product grid ──► Cart page ──► Header badge                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               rocketshoes-cart (CartStore)                      │   │
//! │  │    add_product, remove_product, update_product_amount          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ rocketshoes-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   stock   │  │   │
//! │  │   │  Stock    │  │   (BRL)   │  │ CartTotals│  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, Stock) and UI notices
//! - [`cart`] - The Cart value and its totals
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Stock and amount rules
//!
//! ## Example Usage
//!
//! ```rust
//! use rocketshoes_core::{Cart, Money, Product};
//!
//! let tenis = Product::new(1, "Tênis de Caminhada", Money::from_cents(17990), 2);
//! let cart = Cart::new().with_product(tenis).unwrap();
//!
//! assert_eq!(cart.totals().total.cents(), 35980);
//! assert_eq!(cart.totals().total.to_string(), "R$ 359,80");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default storage namespace.
///
/// The storefront has always kept its cart under `@RocketShoes:cart`, so
/// carts saved by earlier sessions keep loading.
pub const DEFAULT_NAMESPACE: &str = "@RocketShoes";

/// Key suffix under which the cart is stored inside a namespace.
pub const CART_KEY_SUFFIX: &str = "cart";

/// Builds the namespaced storage key for the cart.
///
/// ```rust
/// assert_eq!(rocketshoes_core::cart_storage_key("@RocketShoes"), "@RocketShoes:cart");
/// ```
pub fn cart_storage_key(namespace: &str) -> String {
    format!("{}:{}", namespace, CART_KEY_SUFFIX)
}
