//! Shared Carts
//!
//! Parks an opaque encoded cart under a short human-typeable code.

pub mod code;
pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::SharesServiceError;
pub use service::*;
