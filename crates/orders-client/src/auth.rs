use orders_types::domain::auth::{LoginRequest, LoginResponse};
use reqwest::Method;

use crate::dispatch::Dispatcher;
use crate::errors::ApiError;

pub struct AuthApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// `POST /auth/login`, unauthenticated. Storing the token is up to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest::new(username, password);
        self.dispatcher
            .dispatch_json("/auth/login", Method::POST, Some(&body), false)
            .await
    }
}
