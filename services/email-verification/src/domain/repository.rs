use std::future::Future;

use crate::domain::types::{ConsumeResult, OutgoingMail};
use crate::error::VerificationError;

/// Key-value store with per-key expiry holding pending tokens, keyed by email.
///
/// Methods return `Send` futures so use cases stay usable from axum handlers
/// generic over the store.
pub trait TokenStore: Send + Sync {
    /// Set the token with a TTL, replacing any pending one.
    fn store(
        &self,
        email: &str,
        token: &str,
        ttl_secs: u64,
    ) -> impl Future<Output = Result<(), VerificationError>> + Send;

    /// Set the token with a TTL only if none is pending. Returns `false` when
    /// a token already exists.
    fn store_if_absent(
        &self,
        email: &str,
        token: &str,
        ttl_secs: u64,
    ) -> impl Future<Output = Result<bool, VerificationError>> + Send;

    fn load(&self, email: &str)
    -> impl Future<Output = Result<Option<String>, VerificationError>> + Send;

    /// Delete the pending token only if it still equals `token`, atomically.
    fn consume(
        &self,
        email: &str,
        token: &str,
    ) -> impl Future<Output = Result<ConsumeResult, VerificationError>> + Send;

    fn ping(&self) -> impl Future<Output = Result<(), VerificationError>> + Send;
}

/// Outbound mail transport.
pub trait Mailer: Send + Sync {
    fn send(&self, mail: &OutgoingMail)
    -> impl Future<Output = Result<(), VerificationError>> + Send;
}
