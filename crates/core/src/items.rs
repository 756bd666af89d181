//! Cart Item Model

use serde::{Deserialize, Serialize};

/// Catalog category a cart item inherits from the product it was created
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hot,
    Cold,
    Specialty,
}

/// A priced, quantified line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Stable catalog identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in minor currency units.
    pub price: u64,

    /// Always at least 1; carts remove items rather than hold a zero
    /// quantity.
    pub quantity: u32,

    /// Image reference inherited from the catalog entry.
    pub image: String,

    /// Category inherited from the catalog entry.
    pub category: Category,
}

impl CartItem {
    /// Line total for this item, saturating on overflow.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}
