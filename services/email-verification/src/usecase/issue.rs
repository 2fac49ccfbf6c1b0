use tracing::{info, warn};

use crate::config::VerificationSettings;
use crate::domain::repository::{Mailer, TokenStore};
use crate::domain::types::{IssueOutcome, PendingPolicy, VERIFICATION_TTL_SECS};
use crate::error::VerificationError;
use crate::token::{confirmation_mail, confirmation_url, derive_token};
use crate::usecase::bounded;

pub struct IssueInput {
    pub email: String,
    /// Display name, used only to personalise the mail.
    pub name: String,
}

pub struct IssueVerificationUseCase<S, M>
where
    S: TokenStore,
    M: Mailer,
{
    pub store: S,
    pub mailer: M,
    pub settings: VerificationSettings,
}

impl<S, M> IssueVerificationUseCase<S, M>
where
    S: TokenStore,
    M: Mailer,
{
    pub async fn execute(&self, input: IssueInput) -> Result<IssueOutcome, VerificationError> {
        let email = input.email.trim();
        if email.is_empty() {
            return Err(VerificationError::InvalidPayload("email is empty".to_owned()));
        }

        // 1. Fresh token (random nonce + salted hash)
        let token = derive_token(email, self.settings.hash_cost).await?;

        // 2. Persist with TTL in one command; nothing is mailed unless this succeeds
        let limit = self.settings.store_timeout;
        match self.settings.pending_policy {
            PendingPolicy::Overwrite => {
                bounded("store", limit, self.store.store(email, &token, VERIFICATION_TTL_SECS))
                    .await?;
            }
            PendingPolicy::Reject => {
                let written = bounded(
                    "store",
                    limit,
                    self.store.store_if_absent(email, &token, VERIFICATION_TTL_SECS),
                )
                .await?;
                if !written {
                    info!(email, "verification already pending");
                    return Ok(IssueOutcome::AlreadyPending);
                }
            }
        }

        // 3. Mail the link. On failure the token stays; its TTL bounds it.
        let link = confirmation_url(&self.settings.verify_url, email, &token);
        let mail = confirmation_mail(email, &input.name, &link);
        if let Err(e) = bounded("mail", self.settings.mail_timeout, self.mailer.send(&mail)).await {
            warn!(email, kind = e.kind(), "verification mail not delivered");
            return Err(e);
        }

        info!(email, "verification mail sent");
        Ok(IssueOutcome::Sent {
            message: format!("Sent to {} via email ({email}).", input.name),
        })
    }
}
