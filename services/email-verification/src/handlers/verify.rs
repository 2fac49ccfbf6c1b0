use axum::{Json, extract::State};
use serde::Deserialize;

use crate::domain::repository::{Mailer, TokenStore};
use crate::domain::types::VerifyOutcome;
use crate::error::VerificationError;
use crate::extract::JsonOrForm;
use crate::handlers::StatusMessage;
use crate::state::AppState;
use crate::usecase::check::CheckInput;

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub token: String,
}

// ── POST /verify ──────────────────────────────────────────────────────────────

/// The caller marks the account verified on 200; this service only owns the token.
pub async fn verify<S, M>(
    State(state): State<AppState<S, M>>,
    JsonOrForm(body): JsonOrForm<VerifyRequest>,
) -> Result<Json<StatusMessage>, VerificationError>
where
    S: TokenStore + Clone + 'static,
    M: Mailer + Clone + 'static,
{
    let outcome = state
        .check_usecase()
        .execute(CheckInput {
            email: body.email,
            token: body.token,
        })
        .await?;
    match outcome {
        VerifyOutcome::Matched => Ok(Json(StatusMessage::ok(
            "Tokens match. Mark as verified in REST.",
        ))),
        VerifyOutcome::Mismatched => Err(VerificationError::TokenMismatch),
        VerifyOutcome::NotFound => Err(VerificationError::TokenNotFound),
    }
}
