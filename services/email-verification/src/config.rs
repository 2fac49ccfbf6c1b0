use std::time::Duration;

use serde::Deserialize;
use url::Url;

use sayonika_core::config::{Config, ConfigError, require};

use crate::domain::types::PendingPolicy;

/// Email verification service configuration, read from `SAYONIKA_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    /// SMTP relay host. Env var: `SAYONIKA_MAIL_HOST`.
    pub mail_host: String,
    /// SMTP port (default 465, implicit TLS; any other port uses STARTTLS).
    #[serde(default = "default_mail_port")]
    pub mail_port: u16,
    pub mail_user: String,
    pub mail_password: String,
    /// `From` mailbox of verification mails.
    #[serde(default = "default_mail_from")]
    pub mail_from: String,
    /// Redis host, optionally with `:port`. Env var: `SAYONIKA_STORE_HOST`.
    pub store_host: String,
    pub store_password: String,
    /// TCP port to listen on (default 3000). Env var: `SAYONIKA_SERVICE_PORT`.
    #[serde(default = "default_service_port")]
    pub service_port: u16,
    /// Page the confirmation link points at.
    #[serde(default = "default_verify_url")]
    pub verify_url: String,
    /// `overwrite` (default) or `reject`.
    #[serde(default)]
    pub pending_policy: PendingPolicy,
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
    #[serde(default = "default_mail_timeout_ms")]
    pub mail_timeout_ms: u64,
    /// bcrypt cost used when deriving tokens.
    #[serde(default = "default_hash_cost")]
    pub hash_cost: u32,
}

fn default_mail_port() -> u16 {
    465
}

fn default_mail_from() -> String {
    "Sayonika <noreply@sayonika.moe>".to_owned()
}

fn default_service_port() -> u16 {
    3000
}

fn default_verify_url() -> String {
    "https://sayonika.moe/api/v1/verify".to_owned()
}

fn default_store_timeout_ms() -> u64 {
    2_000
}

fn default_mail_timeout_ms() -> u64 {
    10_000
}

fn default_hash_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Config for VerificationConfig {
    const PREFIX: &'static str = "SAYONIKA_";

    fn validate(&self) -> Result<(), ConfigError> {
        require("mail_host", &self.mail_host)?;
        require("mail_user", &self.mail_user)?;
        require("mail_password", &self.mail_password)?;
        require("mail_from", &self.mail_from)?;
        require("store_host", &self.store_host)?;
        require("store_password", &self.store_password)?;
        if !(4..=31).contains(&self.hash_cost) {
            return Err(ConfigError::Invalid {
                field: "hash_cost",
                reason: format!("{} is outside 4..=31", self.hash_cost),
            });
        }
        if self.store_timeout_ms == 0 || self.mail_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "store_timeout_ms/mail_timeout_ms",
                reason: "timeouts must be positive".to_owned(),
            });
        }
        self.settings().map(|_| ())
    }
}

impl VerificationConfig {
    /// `redis://:<password>@<store_host>`, with the password percent-encoded.
    pub fn store_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(&format!("redis://{}", self.store_host)).map_err(|e| {
            ConfigError::Invalid {
                field: "store_host",
                reason: e.to_string(),
            }
        })?;
        url.set_password(Some(&self.store_password))
            .map_err(|()| ConfigError::Invalid {
                field: "store_host",
                reason: "cannot carry a password".to_owned(),
            })?;
        Ok(url)
    }

    /// The subset the issuer and checker need.
    pub fn settings(&self) -> Result<VerificationSettings, ConfigError> {
        let verify_url = Url::parse(&self.verify_url).map_err(|e| ConfigError::Invalid {
            field: "verify_url",
            reason: e.to_string(),
        })?;
        Ok(VerificationSettings {
            verify_url,
            pending_policy: self.pending_policy,
            hash_cost: self.hash_cost,
            store_timeout: Duration::from_millis(self.store_timeout_ms),
            mail_timeout: Duration::from_millis(self.mail_timeout_ms),
        })
    }
}

/// Runtime knobs handed to the use cases.
#[derive(Debug, Clone)]
pub struct VerificationSettings {
    pub verify_url: Url,
    pub pending_policy: PendingPolicy,
    pub hash_cost: u32,
    pub store_timeout: Duration,
    pub mail_timeout: Duration,
}
