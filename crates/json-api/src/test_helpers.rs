//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use sidecart_app::domain::shares::{MockSharesService, models::ShareRecord};

use crate::state::State;

pub(crate) fn make_share(code: &str, encoded: &str) -> ShareRecord {
    ShareRecord {
        uuid: Uuid::now_v7(),
        code: code.to_string(),
        encoded: encoded.to_string(),
        created_at: Timestamp::now(),
        expires_at: None,
    }
}

pub(crate) fn shares_state(shares: MockSharesService) -> Arc<State> {
    Arc::new(State::new(Arc::new(shares), None))
}

pub(crate) fn shares_service(shares: MockSharesService, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(shares_state(shares))).push(route))
}
