use axum::{Json, extract::State};
use serde::Deserialize;

use crate::domain::repository::{Mailer, TokenStore};
use crate::domain::types::IssueOutcome;
use crate::error::VerificationError;
use crate::extract::JsonOrForm;
use crate::handlers::StatusMessage;
use crate::state::AppState;
use crate::usecase::issue::IssueInput;

#[derive(Deserialize)]
pub struct SendMailRequest {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

// ── POST /sendmail ────────────────────────────────────────────────────────────

pub async fn send_mail<S, M>(
    State(state): State<AppState<S, M>>,
    JsonOrForm(body): JsonOrForm<SendMailRequest>,
) -> Result<Json<StatusMessage>, VerificationError>
where
    S: TokenStore + Clone + 'static,
    M: Mailer + Clone + 'static,
{
    let outcome = state
        .issue_usecase()
        .execute(IssueInput {
            email: body.email,
            name: body.name,
        })
        .await?;
    match outcome {
        IssueOutcome::Sent { message } => Ok(Json(StatusMessage::ok(message))),
        IssueOutcome::AlreadyPending => Err(VerificationError::AlreadyPending),
    }
}
