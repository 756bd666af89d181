//! Cart session.
//!
//! The explicitly owned cart context: hydrates from the sync mailbox on
//! attach, publishes after every mutation, applies publishes from other
//! contexts silently, and tears its subscription down on drop.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sidecart::{Cart, CartItem, EncodeError, ImportMode, ImportPreview};

use crate::sync::{SyncContext, SyncSubscription};

pub struct CartSession {
    cart: Arc<Mutex<Cart>>,
    ctx: SyncContext,
    _subscription: SyncSubscription,
}

fn lock(cart: &Arc<Mutex<Cart>>) -> MutexGuard<'_, Cart> {
    cart.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CartSession {
    /// Attaches a session to the channel, hydrating from the last
    /// published envelope when one exists.
    #[must_use]
    pub fn attach(ctx: SyncContext) -> Self {
        let cart = Arc::new(Mutex::new(Cart::new()));

        if let Some(payload) = ctx.latest() {
            lock(&cart).replace(payload.items);
        }

        let synced = Arc::clone(&cart);
        let subscription = ctx.subscribe(move |items| {
            lock(&synced).replace(items);
        });

        Self {
            cart,
            ctx,
            _subscription: subscription,
        }
    }

    /// Snapshot of the current items.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        lock(&self.cart).items().to_vec()
    }

    /// Grand total in minor currency units.
    #[must_use]
    pub fn total(&self) -> u64 {
        lock(&self.cart).total()
    }

    /// Total number of units across all items.
    #[must_use]
    pub fn count(&self) -> u32 {
        lock(&self.cart).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.cart).is_empty()
    }

    /// Adds an item and propagates the change.
    ///
    /// # Errors
    ///
    /// Returns an error when the updated cart cannot be encoded.
    pub fn add(&self, item: CartItem) -> Result<(), EncodeError> {
        let items = {
            let mut cart = lock(&self.cart);
            cart.add(item);
            cart.items().to_vec()
        };

        self.ctx.publish(&items)
    }

    /// Removes an item and propagates the change.
    ///
    /// # Errors
    ///
    /// Returns an error when the updated cart cannot be encoded.
    pub fn remove(&self, id: &str) -> Result<(), EncodeError> {
        let items = {
            let mut cart = lock(&self.cart);
            cart.remove(id);
            cart.items().to_vec()
        };

        self.ctx.publish(&items)
    }

    /// Sets an item's quantity (zero removes it) and propagates the
    /// change.
    ///
    /// # Errors
    ///
    /// Returns an error when the updated cart cannot be encoded.
    pub fn set_quantity(&self, id: &str, quantity: u32) -> Result<(), EncodeError> {
        let items = {
            let mut cart = lock(&self.cart);
            cart.set_quantity(id, quantity);
            cart.items().to_vec()
        };

        self.ctx.publish(&items)
    }

    /// Clears the cart and propagates the change, so clearing in one
    /// tab clears everywhere.
    ///
    /// # Errors
    ///
    /// Returns an error when the empty cart cannot be encoded.
    pub fn clear(&self) -> Result<(), EncodeError> {
        let items = {
            let mut cart = lock(&self.cart);
            cart.clear();
            cart.items().to_vec()
        };

        self.ctx.publish(&items)
    }

    /// Applies a confirmed import preview and propagates the change.
    ///
    /// # Errors
    ///
    /// Returns an error when the updated cart cannot be encoded.
    pub fn import(&self, preview: ImportPreview, mode: ImportMode) -> Result<(), EncodeError> {
        let items = {
            let mut cart = lock(&self.cart);
            preview.apply(&mut cart, mode);
            cart.items().to_vec()
        };

        self.ctx.publish(&items)
    }
}

impl std::fmt::Debug for CartSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession")
            .field("items", &lock(&self.cart).items().len())
            .finish_non_exhaustive()
    }
}
