//! Client-side cart sharing: the sharing facade with its local-store
//! fallback, the cross-tab sync channel, and the import resolution flow.

pub mod api;
pub mod import;
pub mod local;
pub mod session;
pub mod sharing;
pub mod sync;

pub use api::{HttpShareCodeApi, ShareApiError, ShareCodeApi};
pub use import::{detect_shared_link, strip_share_param};
pub use local::{LocalStore, MemoryStore};
pub use session::CartSession;
pub use sharing::ShareClient;
pub use sync::{SyncBus, SyncContext, SyncSubscription};
