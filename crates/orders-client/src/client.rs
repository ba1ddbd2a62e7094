use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use orders_types::ports::credentials::CredentialProvider;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;

use crate::auth::AuthApi;
use crate::config::ClientConfig;
use crate::dispatch::{CredentialsMode, Dispatcher};
use crate::orders::OrdersApi;

#[derive(Clone)]
pub struct OrdersClientBuilder {
    base: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
    credentials_mode: CredentialsMode,
    credentials: Option<Arc<dyn CredentialProvider>>,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct OrdersClient {
    dispatcher: Dispatcher,
}

impl OrdersClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<OrdersClientBuilder> {
        Url::parse(base_url).context("invalid base url")?;
        Ok(OrdersClientBuilder {
            base: base_url.to_owned(),
            headers: HeaderMap::new(),
            timeout: None,
            credentials_mode: CredentialsMode::default(),
            credentials: None,
            client: None,
        })
    }

    pub fn from_config(
        config: &ClientConfig,
        credentials: Option<Arc<dyn CredentialProvider>>,
    ) -> anyhow::Result<Self> {
        let mut builder =
            Self::builder(&config.base_url)?.with_credentials_mode(config.credentials_mode);
        if let Some(timeout) = config.timeout {
            builder = builder.with_timeout(timeout);
        }
        if let Some(credentials) = credentials {
            builder = builder.with_credentials(credentials);
        }
        builder.build()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.dispatcher)
    }

    pub fn orders(&self) -> OrdersApi<'_> {
        OrdersApi::new(&self.dispatcher)
    }
}

impl OrdersClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_credentials_mode(mut self, mode: CredentialsMode) -> Self {
        self.credentials_mode = mode;
        self
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Use a preconfigured client; headers, timeout and cookie policy set on
    /// this builder are then ignored.
    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<OrdersClient> {
        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder()
                    .cookie_store(self.credentials_mode == CredentialsMode::Include);
                if !self.headers.is_empty() {
                    builder = builder.default_headers(self.headers);
                }
                if let Some(t) = self.timeout {
                    builder = builder.timeout(t);
                }
                builder.build()?
            }
        };
        Ok(OrdersClient {
            dispatcher: Dispatcher::new(
                &self.base,
                client,
                self.credentials_mode,
                self.credentials,
            ),
        })
    }
}
