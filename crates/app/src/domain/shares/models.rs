//! Share Models

use jiff::Timestamp;
use uuid::Uuid;

/// Share Record Model
///
/// Immutable once persisted. Sharing a new version of a cart mints a new
/// record; nothing ever updates an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRecord {
    pub uuid: Uuid,
    pub code: String,
    pub encoded: String,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
}

/// New Share Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewShare {
    /// The opaque encoded cart. The store never inspects it.
    pub encoded: String,

    /// Optional expiry; expired records are invisible to lookups.
    pub expires_at: Option<Timestamp>,
}
