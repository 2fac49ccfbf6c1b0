use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Email verification service error variants.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("a verification token is already pending")]
    AlreadyPending,
    #[error("incorrect token")]
    TokenMismatch,
    #[error("token does not exist, it may have expired")]
    TokenNotFound,
    #[error("backend error")]
    Store(#[source] anyhow::Error),
    #[error("failed to send verification mail")]
    Mail(#[source] anyhow::Error),
    #[error("{0} timed out")]
    Timeout(&'static str),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl VerificationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::AlreadyPending => "ALREADY_PENDING",
            Self::TokenMismatch => "TOKEN_MISMATCH",
            Self::TokenNotFound => "TOKEN_NOT_FOUND",
            Self::Store(_) => "STORE_UNAVAILABLE",
            Self::Mail(_) => "MAIL_FAILED",
            Self::Timeout(_) => "TIMEOUT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::AlreadyPending => StatusCode::CONFLICT,
            Self::TokenMismatch => StatusCode::FORBIDDEN,
            Self::TokenNotFound => StatusCode::GONE,
            Self::Store(_) | Self::Mail(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for VerificationError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are expected client outcomes and already visible in the TraceLayer span.
        if status.is_server_error() {
            match &self {
                Self::Store(e) | Self::Mail(e) | Self::Internal(e) => {
                    tracing::error!(error = ?e, kind = self.kind(), "request failed");
                }
                _ => tracing::error!(kind = self.kind(), "{}", self),
            }
        }
        let body = serde_json::json!({
            "code": status.as_u16(),
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
