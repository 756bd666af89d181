//! Share token codec.
//!
//! A cart is wrapped in a [`SharedCartPayload`], serialized to JSON,
//! percent-encoded, then base64url-encoded. The percent-encoding step
//! escapes non-ASCII text before the binary-safe step so item names in
//! any script survive the round trip. The resulting token is safe to
//! embed in a URL query parameter as-is.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::CartItem;

/// A cart serialized into a portable artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedCartPayload {
    /// The shared items, in order. A zero-item payload is valid.
    pub items: Vec<CartItem>,

    /// When the payload was created. Tolerated absent on decode.
    #[serde(default)]
    pub shared_at: Option<Timestamp>,

    /// Who shared the cart, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_by: Option<String>,
}

impl SharedCartPayload {
    /// Wraps items into a payload stamped with the current time.
    #[must_use]
    pub fn new(items: Vec<CartItem>) -> Self {
        Self {
            items,
            shared_at: Some(Timestamp::now()),
            shared_by: None,
        }
    }
}

/// Encoding failure. Decoding never fails loudly; see [`decode`].
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to serialize cart payload")]
    Serialize(#[source] serde_json::Error),
}

/// Encodes items into a URL-safe share token.
///
/// # Errors
///
/// Returns an error when the payload cannot be serialized to JSON.
pub fn encode(items: &[CartItem]) -> Result<String, EncodeError> {
    encode_payload(&SharedCartPayload::new(items.to_vec()))
}

/// Encodes a prepared payload into a URL-safe share token.
///
/// # Errors
///
/// Returns an error when the payload cannot be serialized to JSON.
pub fn encode_payload(payload: &SharedCartPayload) -> Result<String, EncodeError> {
    let json = serde_json::to_string(payload).map_err(EncodeError::Serialize)?;
    let escaped = urlencoding::encode(&json);

    Ok(BASE64.encode(escaped.as_bytes()))
}

/// Decodes a share token back into a payload.
///
/// Returns `None` for malformed base64, malformed escaping, malformed
/// JSON, or JSON whose `items` field is absent or not a sequence. `None`
/// is the only failure signal; callers never see an error value.
#[must_use]
pub fn decode(token: &str) -> Option<SharedCartPayload> {
    let bytes = BASE64.decode(token).ok()?;
    let escaped = String::from_utf8(bytes).ok()?;
    let json = urlencoding::decode(&escaped).ok()?;

    serde_json::from_str(&json).ok()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::items::Category;

    use super::*;

    fn item(id: &str, name: &str, price: u64, quantity: u32) -> CartItem {
        CartItem {
            id: id.to_string(),
            name: name.to_string(),
            price,
            quantity,
            image: format!("/images/{id}.jpg"),
            category: Category::Specialty,
        }
    }

    fn token_of(json: &str) -> String {
        BASE64.encode(urlencoding::encode(json).as_bytes())
    }

    #[test]
    fn round_trip_preserves_items_and_order() -> TestResult {
        let items = vec![
            item("3", "Flat White", 450, 1),
            item("1", "Caramel Latte", 499, 2),
            item("2", "Cold Brew", 399, 4),
        ];

        let token = encode(&items)?;
        let decoded = decode(&token).expect("decode should succeed");

        assert_eq!(decoded.items, items);
        assert!(decoded.shared_at.is_some());

        Ok(())
    }

    #[test]
    fn round_trip_preserves_unicode_names() -> TestResult {
        let items = vec![
            item("1", "Кофе с молоком", 350, 1),
            item("2", "抹茶ラテ", 520, 2),
            item("3", "Café au lait ☕", 410, 1),
        ];

        let token = encode(&items)?;
        let decoded = decode(&token).expect("decode should succeed");

        assert_eq!(decoded.items, items);

        Ok(())
    }

    #[test]
    fn round_trip_of_empty_cart_is_valid() -> TestResult {
        let token = encode(&[])?;
        let decoded = decode(&token).expect("decode should succeed");

        assert!(decoded.items.is_empty());

        Ok(())
    }

    #[test]
    fn token_needs_no_further_percent_encoding() -> TestResult {
        let items = vec![item("1", "Caramel Latte + extra shot?", 499, 2)];

        let token = encode(&items)?;

        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "token contains non-URL-safe characters: {token}"
        );

        Ok(())
    }

    #[test]
    fn decode_rejects_truncated_token() -> TestResult {
        let items = vec![item("1", "Caramel Latte", 499, 2)];
        let token = encode(&items)?;
        let truncated: String = token.chars().take(token.len() / 2).collect();

        assert!(decode(&truncated).is_none());

        Ok(())
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode("!!not base64!!").is_none());
        assert!(decode("").is_none());
    }

    #[test]
    fn decode_rejects_json_without_items() {
        let token = token_of(r#"{"shared_at":null}"#);

        assert!(decode(&token).is_none());
    }

    #[test]
    fn decode_rejects_items_that_are_not_a_sequence() {
        let token = token_of(r#"{"items":"not-a-sequence"}"#);

        assert!(decode(&token).is_none());
    }

    #[test]
    fn decode_tolerates_missing_timestamp() {
        let token = token_of(r#"{"items":[]}"#);
        let decoded = decode(&token).expect("decode should succeed");

        assert!(decoded.items.is_empty());
        assert!(decoded.shared_at.is_none());
    }
}
