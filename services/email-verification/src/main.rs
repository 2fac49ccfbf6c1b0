use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use sayonika_core::config::Config;
use sayonika_core::tracing::init_tracing;
use sayonika_email_verification::config::VerificationConfig;
use sayonika_email_verification::infra::mail::SmtpMailer;
use sayonika_email_verification::infra::store::RedisTokenStore;
use sayonika_email_verification::router::build_router;
use sayonika_email_verification::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Bad config is fatal: refuse to start rather than fail every request.
    let config = match VerificationConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return Err(e.into());
        }
    };
    let settings = config.settings()?;

    let redis_cfg = deadpool_redis::Config::from_url(config.store_url()?.as_str());
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .context("failed to create Redis pool")?;

    let mailer = SmtpMailer::from_config(&config)?;

    let state = AppState {
        store: RedisTokenStore { pool: redis },
        mailer,
        settings: Arc::new(settings),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.service_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        pending_policy = ?config.pending_policy,
        "email verification service listening on {addr}"
    );
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
