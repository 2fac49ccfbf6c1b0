use serde::de::DeserializeOwned;

/// Startup configuration failure. Services refuse to start on any of these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),
    #[error("missing required config value `{0}`")]
    Missing(&'static str),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`, pick the variable prefix, and
/// check their own required fields in [`Config::validate`]. Field `mail_host`
/// with prefix `SAYONIKA_` is read from `SAYONIKA_MAIL_HOST`.
pub trait Config: Sized + DeserializeOwned {
    const PREFIX: &'static str;

    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Same as [`Config::from_env`] over an explicit set of variables.
    fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(Self::PREFIX).from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }
}

/// Fails with [`ConfigError::Missing`] when `value` is empty or whitespace.
pub fn require(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Missing(field));
    }
    Ok(())
}
