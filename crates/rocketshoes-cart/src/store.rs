//! # Cart Store
//!
//! The single owner of the shopper's cart.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action          Operation                 Remote calls              │
//! │  ─────────          ─────────                 ────────────              │
//! │                                                                         │
//! │  "Add to cart" ───► add_product(id) ────────► stock(id) [+ product(id)] │
//! │                                                                         │
//! │  "+" / "-" ───────► update_product_amount() ─► stock(id)                │
//! │                                                                         │
//! │  Trash icon ──────► remove_product(id) ──────► (none)                   │
//! │                                                                         │
//! │  Every successful mutation:                                             │
//! │    1. builds a NEW Cart value (old snapshots stay valid)                │
//! │    2. saves it under "<namespace>:cart"                                 │
//! │    3. publishes it to cart() / subscribe()                              │
//! │                                                                         │
//! │  Every failure: one Notice, a log entry, cart untouched.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Mutations are serialized by a write gate held from the moment the
//! current cart is read until the new one is committed, so the stock check
//! and the write always see the same cart. Readers never wait on it.

use std::sync::Arc;

use rocketshoes_core::validation::ensure_in_stock;
use rocketshoes_core::{Cart, CartTotals, CoreError, Notice, ProductId, UpdateProductAmount};
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, instrument, warn};

use crate::catalog::Catalog;
use crate::error::{StoreError, StoreResult};
use crate::notify::Notifier;
use crate::storage::CartRepository;

/// Shopping-cart state container.
///
/// Constructed once per session and shared by reference (or `Arc`) with
/// every consumer.
pub struct CartStore {
    catalog: Arc<dyn Catalog>,
    repository: CartRepository,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<Arc<Cart>>,
    write_gate: Mutex<()>,
}

impl CartStore {
    /// Opens the store, restoring the persisted cart if there is a valid one.
    ///
    /// An unreadable or invalid persisted cart is logged and replaced by an
    /// empty cart; it is overwritten by the next successful mutation.
    pub fn open(
        catalog: Arc<dyn Catalog>,
        repository: CartRepository,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let cart = match repository.load() {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = repository.key(), error = %e, "Discarding persisted cart");
                Cart::new()
            }
        };

        info!(items = cart.len(), "Cart store ready");
        let (state, _) = watch::channel(Arc::new(cart));

        CartStore {
            catalog,
            repository,
            notifier,
            state,
            write_gate: Mutex::new(()),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current cart snapshot.
    pub fn cart(&self) -> Arc<Cart> {
        self.state.borrow().clone()
    }

    pub fn totals(&self) -> CartTotals {
        self.state.borrow().totals()
    }

    /// Receives every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.state.subscribe()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Not in cart: fetches the product and appends it with amount 1
    /// - In cart: raises its amount by one
    /// - Either way the new amount must fit the current stock
    ///
    /// ## Notices
    /// - `StockExceeded` when the stock does not allow one more unit
    /// - `AddFailed` on any lookup or persistence failure
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) {
        let _gate = self.write_gate.lock().await;

        if let Err(e) = self.try_add_product(product_id).await {
            self.report(e, Notice::AddFailed { product_id });
        }
    }

    /// Removes a product entirely.
    ///
    /// ## Notices
    /// - `RemoveFailed` if the product is not in the cart or the removal
    ///   cannot be persisted
    #[instrument(skip(self))]
    pub async fn remove_product(&self, product_id: ProductId) {
        let _gate = self.write_gate.lock().await;

        if let Err(e) = self.try_remove_product(product_id) {
            self.report(e, Notice::RemoveFailed { product_id });
        }
    }

    /// Sets the amount of a product already in the cart.
    ///
    /// ## Behavior
    /// - `amount <= 0`: ignored, removal goes through [`Self::remove_product`]
    /// - Product not in cart: ignored after the stock check
    ///
    /// ## Notices
    /// - `StockExceeded` when `amount` is above the current stock
    /// - `UpdateFailed` on lookup or persistence failure
    #[instrument(skip(self))]
    pub async fn update_product_amount(&self, request: UpdateProductAmount) {
        let UpdateProductAmount { product_id, amount } = request;
        if amount <= 0 {
            debug!(product_id, amount, "Ignoring non-positive amount");
            return;
        }

        let _gate = self.write_gate.lock().await;

        if let Err(e) = self.try_update_product_amount(product_id, amount).await {
            self.report(e, Notice::UpdateFailed { product_id });
        }
    }

    // =========================================================================
    // Internals (caller holds the write gate)
    // =========================================================================

    async fn try_add_product(&self, product_id: ProductId) -> StoreResult<()> {
        let cart = self.cart();
        let current = cart.amount_of(product_id);

        let stock = self.catalog.stock(product_id).await?;
        // No stock can hold more than i32::MAX units.
        let requested = current
            .checked_add(1)
            .ok_or(CoreError::InsufficientStock {
                product_id,
                available: stock.amount,
                requested: current,
            })?;
        ensure_in_stock(product_id, requested, &stock)?;

        let next = if current > 0 {
            cart.with_amount(product_id, requested)?
        } else {
            let product = self.catalog.product(product_id).await?;
            cart.with_product(product.with_amount(1))?
        };

        self.commit(next)?;
        info!(product_id, amount = requested, "Product added to cart");
        Ok(())
    }

    fn try_remove_product(&self, product_id: ProductId) -> StoreResult<()> {
        let next = self.cart().without_product(product_id)?;
        self.commit(next)?;
        info!(product_id, "Product removed from cart");
        Ok(())
    }

    async fn try_update_product_amount(&self, product_id: ProductId, amount: i32) -> StoreResult<()> {
        let stock = self.catalog.stock(product_id).await?;
        ensure_in_stock(product_id, amount, &stock)?;

        let next = match self.cart().with_amount(product_id, amount) {
            Ok(next) => next,
            Err(CoreError::ProductNotInCart(_)) => {
                debug!(product_id, "Product not in cart, nothing to update");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        self.commit(next)?;
        info!(product_id, amount, "Product amount updated");
        Ok(())
    }

    /// Persists `next`, then publishes it.
    ///
    /// Nothing is published when the write fails, so the snapshot always
    /// equals what is on disk.
    fn commit(&self, next: Cart) -> StoreResult<()> {
        self.repository.save(&next)?;
        self.state.send_replace(Arc::new(next));
        Ok(())
    }

    /// Turns an aborted operation into exactly one notice.
    fn report(&self, err: StoreError, fallback: Notice) {
        let product_id = fallback.product_id();

        let notice = if err.is_insufficient_stock() {
            warn!(product_id, error = %err, "Stock limit reached");
            Notice::StockExceeded { product_id }
        } else {
            error!(product_id, error = %err, "Cart operation failed");
            fallback
        };

        self.notifier.notify(&notice);
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("repository", &self.repository)
            .field("cart", &self.cart())
            .finish()
    }
}
