use std::time::Duration;

use constant_time_eq::constant_time_eq;
use tracing::{info, warn};

use crate::domain::repository::TokenStore;
use crate::domain::types::{ConsumeResult, VerifyOutcome};
use crate::error::VerificationError;
use crate::usecase::bounded;

pub struct CheckInput {
    pub email: String,
    pub token: String,
}

pub struct CheckVerificationUseCase<S>
where
    S: TokenStore,
{
    pub store: S,
    pub store_timeout: Duration,
}

impl<S> CheckVerificationUseCase<S>
where
    S: TokenStore,
{
    /// Only `Matched` mutates the store.
    pub async fn execute(&self, input: CheckInput) -> Result<VerifyOutcome, VerificationError> {
        let email = input.email.trim();
        if email.is_empty() {
            return Err(VerificationError::InvalidPayload("email is empty".to_owned()));
        }

        // 1. Absent covers both expired and never issued
        let Some(stored) = bounded("store", self.store_timeout, self.store.load(email)).await?
        else {
            info!(email, "no pending verification");
            return Ok(VerifyOutcome::NotFound);
        };

        // 2. Compare without leaking the matching prefix length
        if !tokens_equal(&stored, &input.token) {
            warn!(email, "verification token mismatch");
            return Ok(VerifyOutcome::Mismatched);
        }

        // 3. Delete only if the value is still the one compared; a concurrent
        //    re-issue must not be wiped by this request.
        let consumed = bounded(
            "store",
            self.store_timeout,
            self.store.consume(email, &input.token),
        )
        .await?;
        Ok(match consumed {
            ConsumeResult::Deleted => {
                info!(email, "email verified");
                VerifyOutcome::Matched
            }
            ConsumeResult::Different => {
                warn!(email, "token replaced during verification");
                VerifyOutcome::Mismatched
            }
            ConsumeResult::Absent => VerifyOutcome::NotFound,
        })
    }
}

fn tokens_equal(stored: &str, submitted: &str) -> bool {
    stored.len() == submitted.len() && constant_time_eq(stored.as_bytes(), submitted.as_bytes())
}
