use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use crate::config::VerificationConfig;
use crate::domain::repository::Mailer;
use crate::domain::types::OutgoingMail;
use crate::error::VerificationError;

/// Port on which the relay expects TLS from the first byte.
const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP submission through an authenticated relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &VerificationConfig) -> anyhow::Result<Self> {
        let builder = if config.mail_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.mail_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.mail_host)
        };
        let builder = builder.with_context(|| format!("invalid mail host {}", config.mail_host))?;

        let transport = builder
            .port(config.mail_port)
            .credentials(Credentials::new(
                config.mail_user.clone(),
                config.mail_password.clone(),
            ))
            .timeout(Some(Duration::from_millis(config.mail_timeout_ms)))
            .build();

        let from: Mailbox = config
            .mail_from
            .parse()
            .with_context(|| format!("invalid sender mailbox {}", config.mail_from))?;

        Ok(Self {
            transport: Arc::new(transport),
            from,
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), VerificationError> {
        let address: Address = mail
            .to_address
            .parse()
            .map_err(|e| VerificationError::InvalidPayload(format!("bad email address: {e}")))?;
        let to_name = (!mail.to_name.is_empty()).then(|| mail.to_name.clone());

        let message = Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(to_name, address))
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(mail.html.clone())
            .context("failed to build message")
            .map_err(VerificationError::Mail)?;

        self.transport
            .send(message)
            .await
            .context("SMTP relay rejected message")
            .map_err(VerificationError::Mail)?;
        Ok(())
    }
}
