//! Get Shared Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, shares::errors::into_status_error, state::State};

/// Shared Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SharedCartResponse {
    /// The stored encoded cart, returned unchanged.
    pub encoded: String,
}

/// Get Shared Cart Handler
///
/// Returns the encoded cart stored under a share code. Lookup is
/// case-insensitive.
#[endpoint(
    tags("shared-cart"),
    summary = "Get Shared Cart",
    responses(
        (status_code = StatusCode::OK, description = "Encoded cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown share code"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<SharedCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let share = state
        .shares
        .get_share(&code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(SharedCartResponse {
        encoded: share.encoded,
    }))
}
