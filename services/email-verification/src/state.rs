use std::sync::Arc;

use crate::config::VerificationSettings;
use crate::domain::repository::{Mailer, TokenStore};
use crate::usecase::check::CheckVerificationUseCase;
use crate::usecase::issue::IssueVerificationUseCase;

/// Shared application state passed to every handler via axum `State`.
///
/// Generic over the store and mailer so tests can run the router on
/// in-memory doubles; production uses `RedisTokenStore` + `SmtpMailer`.
#[derive(Clone)]
pub struct AppState<S, M> {
    pub store: S,
    pub mailer: M,
    pub settings: Arc<VerificationSettings>,
}

impl<S, M> AppState<S, M>
where
    S: TokenStore + Clone,
    M: Mailer + Clone,
{
    pub fn issue_usecase(&self) -> IssueVerificationUseCase<S, M> {
        IssueVerificationUseCase {
            store: self.store.clone(),
            mailer: self.mailer.clone(),
            settings: (*self.settings).clone(),
        }
    }

    pub fn check_usecase(&self) -> CheckVerificationUseCase<S> {
        CheckVerificationUseCase {
            store: self.store.clone(),
            store_timeout: self.settings.store_timeout,
        }
    }
}
