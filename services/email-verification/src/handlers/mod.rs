pub mod health;
pub mod sendmail;
pub mod verify;

use serde::Serialize;

/// Success body shared by both endpoints, `{code, message}`.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub code: u16,
    pub message: String,
}

impl StatusMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            code: 200,
            message: message.into(),
        }
    }
}
