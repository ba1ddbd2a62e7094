use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An order as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i32,
    pub customer_name: String,
    pub phone: String,
    pub prescription: String,
    pub frame_type: String,
    pub lens_type: String,
    pub total_amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub phone: String,
    pub prescription: String,
    pub frame_type: String,
    pub lens_type: String,
    pub total_amount: f64,
    pub status: String,
}

/// Payload for `PUT /orders/{id}`. Unset fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl OrderChanges {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Body of `GET /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPage {
    pub items: Vec<Order>,
    pub total: u64,
}

/// Paging for `GET /orders`. The server defaults to page 1 with 10 items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageQuery {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Renders `?page=..&page_size=..`, or an empty string when nothing is set.
    pub fn query_string(&self) -> String {
        let params: Vec<String> = [("page", self.page), ("page_size", self.page_size)]
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| format!("{name}={v}")))
            .collect();
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}
