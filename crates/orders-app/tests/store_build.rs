use std::sync::Arc;

use httpmock::prelude::*;
use orders_client::OrdersClient;
use orders_store::{build_store, Store, StoredCredential, DEFAULT_TOKEN_KEY};
use orders_types::ports::credentials::{CredentialProvider, TokenStore};

#[tokio::test]
async fn builds_token_store_from_url() {
    // Use a temp DB path for isolation.
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("session-test.db");
    let url = format!("sqlite://{}", db_path.display());

    let store: Store = build_store(Some(&url)).await.expect("build store");
    // basic sanity: a fresh store has no session
    assert!(store.get(DEFAULT_TOKEN_KEY).await.expect("get").is_none());
}

#[tokio::test]
async fn stored_token_authenticates_client() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("session.db").display());
    let store = build_store(Some(&url)).await.unwrap();
    let credential = StoredCredential::new(store.clone(), DEFAULT_TOKEN_KEY);
    assert!(credential.current().await.unwrap().is_none());

    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/api/orders")
            .header("authorization", "Bearer from-store");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"items":[],"total":0}"#);
    });

    store.set(DEFAULT_TOKEN_KEY, "from-store").await.unwrap();
    let client = OrdersClient::builder(&server.url("/api"))
        .unwrap()
        .with_credentials(Arc::new(credential))
        .build()
        .unwrap();
    let page = client.orders().get_orders().await.unwrap();
    assert_eq!(page.total, 0);
    list.assert();
}
