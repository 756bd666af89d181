//! Create Shared Cart Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use sidecart_app::domain::shares::models::NewShare;

use crate::{extensions::*, shares::errors::into_status_error, state::State};

/// Share Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShareCartRequest {
    /// The encoded cart payload. Opaque to the server.
    #[serde(default)]
    pub encoded: String,
}

/// Share Code Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShareCodeResponse {
    /// Short code the cart can later be retrieved with.
    pub code: String,
}

/// Create Shared Cart Handler
///
/// Parks an encoded cart server-side and returns a short share code.
#[endpoint(
    tags("shared-cart"),
    summary = "Create Share Code",
    responses(
        (status_code = StatusCode::OK, description = "Share code created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing encoded cart data"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ShareCartRequest>,
    depot: &mut Depot,
) -> Result<Json<ShareCodeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let expires_at = state
        .share_ttl
        .map(|ttl| Timestamp::now().checked_add(ttl).unwrap_or(Timestamp::MAX));

    let share = state
        .shares
        .create_share(NewShare {
            encoded: json.into_inner().encoded,
            expires_at,
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(ShareCodeResponse { code: share.code }))
}
