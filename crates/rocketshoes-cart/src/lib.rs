//! # rocketshoes-cart: Cart Store for the Rocket Shoes Storefront
//!
//! Holds the shopper's cart, checks every quantity against the remote
//! stock, and mirrors the cart into local storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rocket Shoes Data Flow                             │
//! │                                                                         │
//! │  UI / CLI  ── add_product(1) ──┐                                        │
//! │                                ▼                                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 rocketshoes-cart (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐   ┌──────────────┐   ┌──────────────────┐    │   │
//! │  │   │  CartStore  │──►│   Catalog    │   │  CartRepository  │    │   │
//! │  │   │  (store.rs) │   │ HTTP/fixture │   │  (storage.rs)    │    │   │
//! │  │   │             │───┼──────────────┼──►│  "<ns>:cart"     │    │   │
//! │  │   │             │──►│   Notifier   │   └──────────────────┘    │   │
//! │  │   └─────────────┘   └──────────────┘                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `CartStore`, the three mutations and the snapshot reads
//! - [`catalog`] - `Catalog` trait, `HttpCatalog`, `FixtureCatalog`
//! - [`storage`] - `KeyValueStore`, `MemoryStore`, `FileStore`, `CartRepository`
//! - [`notify`] - `Notifier`, `LogNotifier`, `ChannelNotifier`
//! - [`config`] - `CartConfig` (TOML + environment)
//! - [`error`] - Error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rocketshoes_cart::{CartRepository, CartStore, ChannelNotifier, HttpCatalog, MemoryStore};
//! use rocketshoes_core::DEFAULT_NAMESPACE;
//!
//! # async fn demo() {
//! let (notifier, mut notices) = ChannelNotifier::new();
//! let store = CartStore::open(
//!     Arc::new(HttpCatalog::new("http://localhost:3333")),
//!     CartRepository::new(MemoryStore::new(), DEFAULT_NAMESPACE),
//!     Arc::new(notifier),
//! );
//!
//! store.add_product(1).await;
//! while let Ok(n) = notices.try_recv() {
//!     eprintln!("{}", n.message);
//! }
//! println!("{} items", store.cart().len());
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;
pub mod store;

pub use catalog::{Catalog, FixtureCatalog, HttpCatalog};
pub use config::{ApiSettings, CartConfig, StorageSettings};
pub use error::{CatalogError, ConfigError, StorageError, StoreError};
pub use notify::{ChannelNotifier, LogNotifier, Notifier};
pub use storage::{CartRepository, FileStore, KeyValueStore, MemoryStore};
pub use store::CartStore;
