use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use crate::error::VerificationError;

/// Body extractor accepting `application/json` or
/// `application/x-www-form-urlencoded`, chosen by `Content-Type`.
/// Anything that is not JSON is parsed as a form. A JSON body must be an object.
pub struct JsonOrForm<T>(pub T);

/// Media types compare case-insensitively and may carry parameters.
fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json")
}

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = VerificationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json);

        if json {
            let Json(value) = Json::<serde_json::Value>::from_request(req, state)
                .await
                .map_err(|e| VerificationError::InvalidPayload(e.body_text()))?;
            // Derived struct visitors also accept arrays.
            if !value.is_object() {
                return Err(VerificationError::InvalidPayload(
                    "payload is not an object".to_owned(),
                ));
            }
            let value = serde_json::from_value(value)
                .map_err(|e| VerificationError::InvalidPayload(e.to_string()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| VerificationError::InvalidPayload(e.body_text()))?;
            Ok(Self(value))
        }
    }
}
