use axum::{extract::State, http::StatusCode};

use crate::domain::repository::{Mailer, TokenStore};
use crate::state::AppState;
use crate::usecase::bounded;

/// Handler for `GET /readyz`: ready once the token store answers.
pub async fn readyz<S, M>(State(state): State<AppState<S, M>>) -> StatusCode
where
    S: TokenStore + Clone + 'static,
    M: Mailer + Clone + 'static,
{
    match bounded("store", state.settings.store_timeout, state.store.ping()).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(kind = e.kind(), "token store not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
