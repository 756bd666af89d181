//! Cart sharing domain: line items, cart state, the share token codec,
//! and import previews.

pub mod cart;
pub mod codec;
pub mod items;
pub mod preview;

pub use cart::Cart;
pub use codec::{EncodeError, SharedCartPayload, decode, encode};
pub use items::{CartItem, Category};
pub use preview::{ImportMode, ImportPreview};
