//! State

use std::sync::Arc;

use jiff::SignedDuration;

use sidecart_app::{context::AppContext, domain::shares::SharesService};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) shares: Arc<dyn SharesService>,

    /// TTL applied to newly created share codes, when configured.
    pub(crate) share_ttl: Option<SignedDuration>,
}

impl State {
    #[must_use]
    pub(crate) fn new(shares: Arc<dyn SharesService>, share_ttl: Option<SignedDuration>) -> Self {
        Self { shares, share_ttl }
    }

    #[must_use]
    pub(crate) fn from_app_context(
        app: &AppContext,
        share_ttl: Option<SignedDuration>,
    ) -> Arc<Self> {
        Arc::new(Self::new(Arc::clone(&app.shares), share_ttl))
    }
}
