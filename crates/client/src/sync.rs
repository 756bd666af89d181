//! Cross-tab cart synchronization.
//!
//! A single mailbox key holds the latest encoded cart; every publish
//! overwrites it and notifies every *other* context. Delivery carries
//! an explicit origin tag, so a writer never observes its own publish
//! and two contexts cannot start oscillating on the same key.
//! Replication is last-writer-wins, not merge.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use sidecart::{CartItem, EncodeError, SharedCartPayload, codec};

use crate::local::LocalStore;

/// Well-known mailbox key for the latest encoded cart.
pub const CART_SYNC_KEY: &str = "current_cart_sync";

type SyncCallback = Box<dyn Fn(Vec<CartItem>) + Send + Sync>;

struct Subscriber {
    id: u64,
    origin: u64,
    callback: SyncCallback,
}

struct Registry {
    subscribers: Mutex<Vec<Subscriber>>,
    next_origin: AtomicU64,
    next_subscriber: AtomicU64,
}

impl Registry {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Subscriber>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// The channel shared by every same-origin context.
#[derive(Clone)]
pub struct SyncBus {
    registry: Arc<Registry>,
    store: Arc<dyn LocalStore>,
}

impl SyncBus {
    #[must_use]
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self {
            registry: Arc::new(Registry {
                subscribers: Mutex::new(Vec::new()),
                next_origin: AtomicU64::new(0),
                next_subscriber: AtomicU64::new(0),
            }),
            store,
        }
    }

    /// A new execution context: one tab's worth of cart.
    #[must_use]
    pub fn context(&self) -> SyncContext {
        SyncContext {
            bus: self.clone(),
            origin: self.registry.next_origin.fetch_add(1, Ordering::Relaxed),
        }
    }

    fn publish_from(&self, origin: u64, items: &[CartItem]) -> Result<(), EncodeError> {
        let token = codec::encode(items)?;

        // The mailbox is overwritten even for an empty cart, so
        // clearing in one context clears everywhere.
        self.store.set(CART_SYNC_KEY, &token);

        let Some(payload) = codec::decode(&token) else {
            return Ok(());
        };

        let subscribers = self.registry.lock();

        for subscriber in subscribers.iter().filter(|s| s.origin != origin) {
            (subscriber.callback)(payload.items.clone());
        }

        Ok(())
    }

    fn subscribe_from(&self, origin: u64, callback: SyncCallback) -> SyncSubscription {
        let id = self.registry.next_subscriber.fetch_add(1, Ordering::Relaxed);

        self.registry.lock().push(Subscriber {
            id,
            origin,
            callback,
        });

        SyncSubscription {
            registry: Arc::clone(&self.registry),
            id,
        }
    }
}

/// One context's handle on the sync channel.
#[derive(Clone)]
pub struct SyncContext {
    bus: SyncBus,
    origin: u64,
}

impl SyncContext {
    /// Publishes the cart to every other context and overwrites the
    /// mailbox. Valid for empty carts.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be encoded.
    pub fn publish(&self, items: &[CartItem]) -> Result<(), EncodeError> {
        self.bus.publish_from(self.origin, items)
    }

    /// Registers a callback fired once per publish from another
    /// context. Dropping the returned subscription deregisters it.
    #[must_use]
    pub fn subscribe<F>(&self, callback: F) -> SyncSubscription
    where
        F: Fn(Vec<CartItem>) + Send + Sync + 'static,
    {
        self.bus.subscribe_from(self.origin, Box::new(callback))
    }

    /// The latest published payload, for hydration at startup.
    #[must_use]
    pub fn latest(&self) -> Option<SharedCartPayload> {
        self.bus
            .store
            .get(CART_SYNC_KEY)
            .and_then(|token| codec::decode(&token))
    }
}

/// Scoped subscription; deregisters exactly once on drop.
pub struct SyncSubscription {
    registry: Arc<Registry>,
    id: u64,
}

impl Drop for SyncSubscription {
    fn drop(&mut self) {
        self.registry.lock().retain(|s| s.id != self.id);
    }
}
