//! Errors

use salvo::http::StatusError;
use tracing::error;

use sidecart_app::domain::shares::SharesServiceError;

pub(crate) fn into_status_error(error: SharesServiceError) -> StatusError {
    match error {
        SharesServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("Missing encoded cart data")
        }
        SharesServiceError::NotFound => StatusError::not_found().brief("Not found"),
        SharesServiceError::Sql(source) => {
            error!("shared cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
