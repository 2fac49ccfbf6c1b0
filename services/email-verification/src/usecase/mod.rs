pub mod check;
pub mod issue;

use std::future::Future;
use std::time::Duration;

use crate::error::VerificationError;

/// Bound a store or mail call; elapsed becomes [`VerificationError::Timeout`].
pub(crate) async fn bounded<T>(
    what: &'static str,
    limit: Duration,
    fut: impl Future<Output = Result<T, VerificationError>>,
) -> Result<T, VerificationError> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| VerificationError::Timeout(what))?
}
