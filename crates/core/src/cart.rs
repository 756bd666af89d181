//! Cart state.

use crate::items::CartItem;

/// An ordered collection of priced line items.
///
/// Mutations keep the quantity invariant: an item whose quantity would
/// drop to zero is removed instead.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Adds an item, merging quantities when an item with the same id is
    /// already present. Zero-quantity items are ignored.
    pub fn add(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
    }

    /// Removes the item with the given id, if present.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }

    /// Sets the quantity of the item with the given id. A quantity of
    /// zero removes the item.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replaces the whole cart with the given items, dropping any
    /// zero-quantity entries.
    pub fn replace(&mut self, items: Vec<CartItem>) {
        self.items = items.into_iter().filter(|i| i.quantity > 0).collect();
    }

    /// Grand total in minor currency units.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items
            .iter()
            .fold(0, |sum, i| sum.saturating_add(i.line_total()))
    }

    /// Total number of units across all items.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |sum, i| sum.saturating_add(i.quantity))
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
