//! Import previews.
//!
//! A resolved share is shown to the user as a preview before anything
//! touches the live cart. Confirming applies the preview in one of two
//! modes; declining simply drops it.

use crate::{cart::Cart, codec::SharedCartPayload, items::CartItem};

/// How a confirmed import is applied to the active cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// The shared cart is a whole-cart artifact; it replaces the active
    /// cart. Used by the link and code paths.
    Replace,

    /// Items are appended one by one, incrementing quantities on id
    /// collision. Used by the order-assist path.
    Append,
}

/// A line of an import preview.
#[derive(Debug, Clone)]
pub struct PreviewLine {
    /// The shared item.
    pub item: CartItem,

    /// Price times quantity, in minor currency units.
    pub line_total: u64,
}

/// A resolved shared cart, priced for display before import.
#[derive(Debug, Clone)]
pub struct ImportPreview {
    lines: Vec<PreviewLine>,
    shared_by: Option<String>,
}

impl ImportPreview {
    /// Builds a preview from a decoded payload.
    #[must_use]
    pub fn from_payload(payload: SharedCartPayload) -> Self {
        let lines = payload
            .items
            .into_iter()
            .map(|item| PreviewLine {
                line_total: item.line_total(),
                item,
            })
            .collect();

        Self {
            lines,
            shared_by: payload.shared_by,
        }
    }

    /// The previewed lines, in shared order.
    #[must_use]
    pub fn lines(&self) -> &[PreviewLine] {
        &self.lines
    }

    /// Attribution carried by the payload, when present.
    #[must_use]
    pub fn shared_by(&self) -> Option<&str> {
        self.shared_by.as_deref()
    }

    /// Grand total across all lines.
    #[must_use]
    pub fn grand_total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |sum, l| sum.saturating_add(l.line_total))
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |sum, l| sum.saturating_add(l.item.quantity))
    }

    /// Applies the confirmed preview to the active cart.
    pub fn apply(self, cart: &mut Cart, mode: ImportMode) {
        let items: Vec<CartItem> = self.lines.into_iter().map(|l| l.item).collect();

        match mode {
            ImportMode::Replace => cart.replace(items),
            ImportMode::Append => {
                for item in items {
                    cart.add(item);
                }
            }
        }
    }
}
