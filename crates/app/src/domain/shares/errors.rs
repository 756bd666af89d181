//! Shares service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SharesServiceError {
    #[error("share code not found")]
    NotFound,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for SharesServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Sql(error)
    }
}
