//! Link import entry point.
//!
//! A navigation URL may carry an embedded share token. Detection fires
//! once per navigation; the caller swaps the address for the stripped
//! URL after a successful decode so refresh or back-navigation cannot
//! re-trigger the import.

use reqwest::Url;

use sidecart::{SharedCartPayload, codec};

use crate::sharing::SHARE_PARAM;

pub(crate) fn share_token(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == SHARE_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Detects an embedded shared cart on a navigation URL.
///
/// Returns the decoded payload together with the URL stripped of the
/// share parameter. `None` when the parameter is absent, the token does
/// not decode, or the payload holds no items.
#[must_use]
pub fn detect_shared_link(url: &Url) -> Option<(SharedCartPayload, Url)> {
    let payload = codec::decode(&share_token(url)?)?;

    if payload.items.is_empty() {
        return None;
    }

    Some((payload, strip_share_param(url)))
}

/// The URL with the share parameter removed and every other query pair
/// kept.
#[must_use]
pub fn strip_share_param(url: &Url) -> Url {
    let remaining: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SHARE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut cleaned = url.clone();

    cleaned.set_query(None);

    if !remaining.is_empty() {
        let mut pairs = cleaned.query_pairs_mut();

        for (key, value) in &remaining {
            pairs.append_pair(key, value);
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use sidecart::{CartItem, Category};
    use testresult::TestResult;

    use crate::{api::MockShareCodeApi, local::MemoryStore, sharing::ShareClient};

    use super::*;

    fn latte() -> CartItem {
        CartItem {
            id: "1".to_string(),
            name: "Caramel Latte".to_string(),
            price: 499,
            quantity: 2,
            image: "/images/caramel-latte.jpg".to_string(),
            category: Category::Hot,
        }
    }

    fn share_url(items: &[CartItem]) -> Url {
        let origin = Url::parse("https://shop.example.com/?utm=news").expect("origin should parse");
        let client = ShareClient::new(
            origin,
            Arc::new(MockShareCodeApi::new()),
            Arc::new(MemoryStore::new()),
        );

        client
            .build_shareable_link(items)
            .expect("link should build")
    }

    #[test]
    fn detect_returns_payload_and_stripped_url() -> TestResult {
        let url = share_url(&[latte()]);

        let (payload, cleaned) = detect_shared_link(&url).expect("link should be detected");

        assert_eq!(payload.items, vec![latte()]);
        assert!(!cleaned.as_str().contains(SHARE_PARAM));

        // Unrelated query pairs survive the strip.
        assert!(cleaned.query_pairs().any(|(k, v)| k == "utm" && v == "news"));

        // Detection does not fire again on the cleaned URL.
        assert!(detect_shared_link(&cleaned).is_none());

        Ok(())
    }

    #[test]
    fn detect_ignores_urls_without_the_parameter() {
        let url = Url::parse("https://shop.example.com/menu").expect("url should parse");

        assert!(detect_shared_link(&url).is_none());
    }

    #[test]
    fn detect_ignores_corrupt_tokens() {
        let mut url = Url::parse("https://shop.example.com/").expect("url should parse");
        url.query_pairs_mut().append_pair(SHARE_PARAM, "!!corrupt!!");

        assert!(detect_shared_link(&url).is_none());
    }

    #[test]
    fn detect_ignores_empty_shared_carts() {
        let url = share_url(&[]);

        assert!(detect_shared_link(&url).is_none());
    }
}
