//! orders-client: HTTP client for the orders backend (request dispatcher + resource façades)

pub mod auth;
pub mod body;
pub mod client;
pub mod config;
pub mod credentials;
pub mod dispatch;
pub mod errors;
pub mod orders;

pub use body::ResponseBody;
pub use client::{OrdersClient, OrdersClientBuilder};
pub use config::ClientConfig;
pub use credentials::StaticCredential;
pub use dispatch::{CredentialsMode, Dispatcher, RequestConfig, NO_BODY};
pub use errors::{ApiError, ErrorKind, FALLBACK_MESSAGE};
pub use orders_types::domain;
pub use reqwest::Method;
