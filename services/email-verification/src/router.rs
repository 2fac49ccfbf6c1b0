use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use sayonika_core::health::healthz;
use sayonika_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::domain::repository::{Mailer, TokenStore};
use crate::handlers::{health::readyz, sendmail::send_mail, verify::verify};
use crate::state::AppState;

pub fn build_router<S, M>(state: AppState<S, M>) -> Router
where
    S: TokenStore + Clone + 'static,
    M: Mailer + Clone + 'static,
{
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<S, M>))
        // Issuer
        .route("/sendmail", post(send_mail::<S, M>))
        // Checker
        .route("/verify", post(verify::<S, M>))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
