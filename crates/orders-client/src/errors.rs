use orders_types::ports::credentials::StoreError;
use thiserror::Error;

use crate::body::ResponseBody;

/// Message used when a failed response carries no `message` of its own.
pub const FALLBACK_MESSAGE: &str = "request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered with a non-2xx status.
    Http,
    /// No usable HTTP response: network, URL, encoding or decoding failure.
    Transport,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message} (status {status})")]
    Http {
        status: u16,
        data: ResponseBody,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("stored credential is not a valid header value")]
    InvalidToken,

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("credential store error: {0}")]
    Credentials(#[from] StoreError),
}

impl ApiError {
    /// Builds the error for a non-2xx response, taking the message from the
    /// body when it has one.
    pub fn http(status: u16, data: ResponseBody) -> Self {
        let message = data.message().unwrap_or(FALLBACK_MESSAGE).to_owned();
        Self::Http {
            status,
            data,
            message,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http { .. } => ErrorKind::Http,
            _ => ErrorKind::Transport,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&ResponseBody> {
        match self {
            Self::Http { data, .. } => Some(data),
            _ => None,
        }
    }
}
