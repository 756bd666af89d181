//! Share Code Config

use clap::Args;
use jiff::SignedDuration;

/// Share code settings.
#[derive(Debug, Args)]
pub struct SharesConfig {
    /// Optional lifetime for newly created share codes, in seconds.
    /// Unset means codes never expire.
    #[arg(long, env = "SHARE_TTL_SECONDS")]
    pub share_ttl_seconds: Option<i64>,
}

impl SharesConfig {
    /// The configured TTL as a duration.
    #[must_use]
    pub fn share_ttl(&self) -> Option<SignedDuration> {
        self.share_ttl_seconds.map(SignedDuration::from_secs)
    }
}
