use orders_types::domain::order::{NewOrder, Order, OrderChanges, OrderPage, PageQuery};
use reqwest::Method;

use crate::dispatch::{Dispatcher, NO_BODY};
use crate::errors::ApiError;

/// Order endpoints. Every call is authenticated; ids go into the path unescaped.
pub struct OrdersApi<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> OrdersApi<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn get_orders(&self) -> Result<OrderPage, ApiError> {
        self.dispatcher
            .dispatch_json("/orders", Method::GET, NO_BODY, true)
            .await
    }

    pub async fn get_orders_page(&self, query: PageQuery) -> Result<OrderPage, ApiError> {
        let endpoint = format!("/orders{}", query.query_string());
        self.dispatcher
            .dispatch_json(&endpoint, Method::GET, NO_BODY, true)
            .await
    }

    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        self.dispatcher
            .dispatch_json("/orders", Method::POST, Some(order), true)
            .await
    }

    pub async fn update_order(&self, id: i32, changes: &OrderChanges) -> Result<Order, ApiError> {
        self.dispatcher
            .dispatch_json(&format!("/orders/{id}"), Method::PUT, Some(changes), true)
            .await
    }

    /// The server answers with an empty body, which is discarded.
    pub async fn delete_order(&self, id: i32) -> Result<(), ApiError> {
        self.dispatcher
            .dispatch(&format!("/orders/{id}"), Method::DELETE, NO_BODY, true)
            .await?;
        Ok(())
    }
}
