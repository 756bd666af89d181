//! Sharing facade.
//!
//! Builds shareable links, mints share codes (server-side when the
//! store is reachable, locally otherwise), and resolves codes and links
//! back into carts. Callers cannot tell which path a code came from,
//! only whether the overall operation succeeded.

use std::sync::Arc;

use reqwest::Url;
use tracing::warn;

use sidecart::{CartItem, EncodeError, SharedCartPayload, codec};

use crate::{api::ShareCodeApi, import::share_token, local::LocalStore};

/// Query parameter carrying an encoded cart token.
pub const SHARE_PARAM: &str = "sharedCart";

/// Length of a locally-derived fallback code.
const LOCAL_CODE_LEN: usize = 12;

pub(crate) fn share_key(code: &str) -> String {
    format!("cart_share_{code}")
}

fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Client-side orchestration for cart sharing.
pub struct ShareClient {
    origin: Url,
    api: Arc<dyn ShareCodeApi>,
    local: Arc<dyn LocalStore>,
}

impl ShareClient {
    #[must_use]
    pub fn new(origin: Url, api: Arc<dyn ShareCodeApi>, local: Arc<dyn LocalStore>) -> Self {
        Self { origin, api, local }
    }

    /// A link to the application origin with the cart embedded as a
    /// query parameter. Pure; no network.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be encoded.
    pub fn build_shareable_link(&self, items: &[CartItem]) -> Result<Url, EncodeError> {
        let token = codec::encode(items)?;
        let mut url = self.origin.clone();

        url.query_pairs_mut().append_pair(SHARE_PARAM, &token);

        Ok(url)
    }

    /// Mints a share code for the cart.
    ///
    /// The short-code store is tried first; any transport failure or
    /// non-success response falls back to a locally-derived code with
    /// the mapping persisted in local storage. The fallback is
    /// transparent: same return type, no distinct error.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be encoded.
    pub async fn request_share_code(&self, items: &[CartItem]) -> Result<String, EncodeError> {
        let token = codec::encode(items)?;

        match self.api.put(&token).await {
            Ok(code) => Ok(code),
            Err(error) => {
                warn!("share code request failed, falling back to local storage: {error}");

                let code: String = token
                    .chars()
                    .take(LOCAL_CODE_LEN)
                    .collect::<String>()
                    .to_uppercase();

                self.local.set(&share_key(&code), &token);

                Ok(code)
            }
        }
    }

    /// Resolves a share code into a cart payload.
    ///
    /// The store is consulted first, the local fallback mapping second.
    /// `None` only once both paths are exhausted.
    pub async fn resolve_share_code(&self, code: &str) -> Option<SharedCartPayload> {
        let code = normalize_code(code);

        match self.api.get(&code).await {
            Ok(encoded) => {
                if let Some(payload) = codec::decode(&encoded) {
                    return Some(payload);
                }

                warn!("stored cart under {code} failed to decode, trying local fallback");
            }
            Err(error) => {
                warn!("share code lookup failed, trying local fallback: {error}");
            }
        }

        let encoded = self.local.get(&share_key(&code))?;

        codec::decode(&encoded)
    }

    /// Resolves a shareable link into a cart payload. No network.
    #[must_use]
    pub fn resolve_share_link(&self, url: &Url) -> Option<SharedCartPayload> {
        codec::decode(&share_token(url)?)
    }
}
