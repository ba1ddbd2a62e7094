use std::fmt;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::ApiError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A response body, parsed according to its declared content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// JSON when the `content-type` header mentions `application/json`, raw
    /// text otherwise. Malformed JSON is an error, not a text fallback.
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self, ApiError> {
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains(JSON_CONTENT_TYPE));
        let text = response.text().await?;
        if is_json {
            let value = serde_json::from_str(&text).map_err(ApiError::Decode)?;
            Ok(Self::Json(value))
        } else {
            Ok(Self::Text(text))
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(t) => Some(t),
        }
    }

    /// The `message` string of a JSON object body.
    pub fn message(&self) -> Option<&str> {
        self.as_json()?.get("message")?.as_str()
    }

    /// Decodes the body into `T`. Text bodies are tried as JSON too, for
    /// servers that omit the content type.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Self::Json(v) => serde_json::from_value(v).map_err(ApiError::Decode),
            Self::Text(t) => serde_json::from_str(&t).map_err(ApiError::Decode),
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(v) => write!(f, "{v}"),
            Self::Text(t) => f.write_str(t),
        }
    }
}
