use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use orders_types::ports::credentials::CredentialProvider;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Request, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::body::{ResponseBody, JSON_CONTENT_TYPE};
use crate::errors::ApiError;

/// Payload placeholder for calls that send no body.
pub const NO_BODY: Option<&'static ()> = None;

/// Cookie policy, mirroring the fetch `credentials` option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CredentialsMode {
    /// Keep and replay cookies the server sets.
    #[default]
    Include,
    Omit,
}

impl FromStr for CredentialsMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include" => Ok(Self::Include),
            "omit" => Ok(Self::Omit),
            other => Err(anyhow!("unknown credentials mode {other:?}")),
        }
    }
}

/// Everything a single request sends besides its URL and body.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub content_type: HeaderValue,
    pub credentials_mode: CredentialsMode,
    pub auth_header: Option<HeaderValue>,
}

impl RequestConfig {
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, self.content_type.clone());
        if let Some(auth) = &self.auth_header {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        headers
    }
}

/// Only these methods carry a request body.
pub fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// Builds one request per call against `base + endpoint` and normalizes the
/// response into a [`ResponseBody`] or an [`ApiError`].
#[derive(Clone)]
pub struct Dispatcher {
    base: String,
    client: reqwest::Client,
    credentials_mode: CredentialsMode,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl Dispatcher {
    pub fn new(
        base: &str,
        client: reqwest::Client,
        credentials_mode: CredentialsMode,
        credentials: Option<Arc<dyn CredentialProvider>>,
    ) -> Self {
        Self {
            base: base.strip_suffix('/').unwrap_or(base).to_owned(),
            client,
            credentials_mode,
            credentials,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `endpoint` is appended as-is; nothing is escaped.
    pub fn url(&self, endpoint: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base, endpoint);
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    pub async fn request_config(&self, requires_auth: bool) -> Result<RequestConfig, ApiError> {
        let auth_header = if requires_auth {
            self.auth_header().await?
        } else {
            None
        };
        Ok(RequestConfig {
            content_type: HeaderValue::from_static(JSON_CONTENT_TYPE),
            credentials_mode: self.credentials_mode,
            auth_header,
        })
    }

    async fn auth_header(&self) -> Result<Option<HeaderValue>, ApiError> {
        let Some(provider) = &self.credentials else {
            return Ok(None);
        };
        match provider.current().await? {
            Some(token) if !token.is_empty() => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| ApiError::InvalidToken)?;
                value.set_sensitive(true);
                Ok(Some(value))
            }
            _ => {
                tracing::debug!("no stored credential, sending unauthenticated");
                Ok(None)
            }
        }
    }

    pub async fn build_request<B>(
        &self,
        endpoint: &str,
        method: Method,
        payload: Option<&B>,
        requires_auth: bool,
    ) -> Result<Request, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let config = self.request_config(requires_auth).await?;
        let url = self.url(endpoint)?;
        let with_body = carries_body(&method);
        let mut builder = self.client.request(method, url).headers(config.headers());
        match payload {
            Some(payload) if with_body => {
                let body = serde_json::to_vec(payload).map_err(ApiError::Encode)?;
                builder = builder.body(body);
            }
            Some(_) => tracing::debug!("payload ignored for body-less method"),
            None => {}
        }
        Ok(builder.build()?)
    }

    /// Sends one request and returns the parsed body of a 2xx response.
    ///
    /// Non-2xx responses become [`ApiError::Http`] with the parsed body
    /// attached; everything else that goes wrong is a transport-kind error.
    pub async fn dispatch<B>(
        &self,
        endpoint: &str,
        method: Method,
        payload: Option<&B>,
        requires_auth: bool,
    ) -> Result<ResponseBody, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!("api_request", %request_id, %method, endpoint);
        async move {
            let result = self
                .round_trip(endpoint, method, payload, requires_auth)
                .await;
            if let Err(err) = &result {
                tracing::error!(error = %err, kind = ?err.kind(), "api request failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    /// [`dispatch`](Self::dispatch), then decode the success body into `T`.
    pub async fn dispatch_json<T, B>(
        &self,
        endpoint: &str,
        method: Method,
        payload: Option<&B>,
        requires_auth: bool,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.dispatch(endpoint, method, payload, requires_auth)
            .await?
            .into_json()
    }

    async fn round_trip<B>(
        &self,
        endpoint: &str,
        method: Method,
        payload: Option<&B>,
        requires_auth: bool,
    ) -> Result<ResponseBody, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .build_request(endpoint, method, payload, requires_auth)
            .await?;
        let sent_body = request
            .body()
            .and_then(|b| b.as_bytes())
            .map(|b| String::from_utf8_lossy(b).into_owned());
        tracing::debug!(
            url = %request.url(),
            payload = sent_body.as_deref(),
            credentials_mode = ?self.credentials_mode,
            authenticated = request.headers().contains_key(AUTHORIZATION),
            "sending request"
        );

        let response = self.client.execute(request).await?;
        let status = response.status();
        let data = ResponseBody::read(response).await?;
        tracing::debug!(status = status.as_u16(), body = %data, "received response");

        if !status.is_success() {
            return Err(ApiError::http(status.as_u16(), data));
        }
        Ok(data)
    }
}
