use std::env;
use std::time::Duration;

use anyhow::Context;

use crate::dispatch::CredentialsMode;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_TOKEN_KEY: &str = "token";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` waits for as long as the transport does.
    pub timeout: Option<Duration>,
    pub credentials_mode: CredentialsMode,
    /// Storage key the session token lives under.
    pub token_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: None,
            credentials_mode: CredentialsMode::Include,
            token_key: DEFAULT_TOKEN_KEY.into(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let base_url = lookup("ORDERS_API_BASE_URL").unwrap_or(defaults.base_url);
        let timeout = lookup("ORDERS_API_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("ORDERS_API_TIMEOUT_SECS must be whole seconds, got {raw:?}"))
            })
            .transpose()?;
        let credentials_mode = lookup("ORDERS_API_CREDENTIALS")
            .map(|raw| raw.parse::<CredentialsMode>())
            .transpose()?
            .unwrap_or(defaults.credentials_mode);
        let token_key = lookup("ORDERS_API_TOKEN_KEY").unwrap_or(defaults.token_key);
        Ok(Self {
            base_url,
            timeout,
            credentials_mode,
            token_key,
        })
    }
}
