use std::sync::Arc;

use httpmock::prelude::*;
use orders_client::{
    ApiError, CredentialsMode, ErrorKind, Method, OrdersClient, ResponseBody, StaticCredential,
    FALLBACK_MESSAGE, NO_BODY,
};
use serde_json::json;

fn client(server: &MockServer, token: Option<&str>) -> OrdersClient {
    OrdersClient::builder(&server.url("/api"))
        .unwrap()
        .with_credentials(Arc::new(StaticCredential::new(token.map(str::to_owned))))
        .build()
        .unwrap()
}

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::test]
async fn json_success_is_returned_unwrapped() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/orders/1")
            .header("content-type", "application/json");
        then.status(200)
            .header("content-type", "application/json; charset=utf-8")
            .body(r#"{"id":1}"#);
    });

    let body = client(&server, None)
        .dispatcher()
        .dispatch("/orders/1", Method::GET, NO_BODY, false)
        .await
        .unwrap();
    assert_eq!(body, ResponseBody::Json(json!({ "id": 1 })));
    mock.assert();
}

#[tokio::test]
async fn text_success_is_returned_as_text() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/health");
        then.status(200).body("ok");
    });

    let body = client(&server, None)
        .dispatcher()
        .dispatch("/health", Method::GET, NO_BODY, false)
        .await
        .unwrap();
    assert_eq!(body, ResponseBody::Text("ok".into()));
}

#[tokio::test]
async fn json_failure_carries_status_data_and_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/orders/99");
        then.status(404)
            .header("content-type", "application/json")
            .body(r#"{"message":"not found"}"#);
    });

    let err = client(&server, None)
        .dispatcher()
        .dispatch("/orders/99", Method::GET, NO_BODY, false)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Http);
    match err {
        ApiError::Http {
            status,
            data,
            message,
        } => {
            assert_eq!(status, 404);
            assert_eq!(data, ResponseBody::Json(json!({ "message": "not found" })));
            assert_eq!(message, "not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn text_failure_uses_fallback_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/orders");
        then.status(500).body("oops");
    });

    let err = client(&server, None)
        .dispatcher()
        .dispatch("/orders", Method::POST, Some(&json!({ "a": 1 })), false)
        .await
        .unwrap_err();
    match err {
        ApiError::Http {
            status,
            data,
            message,
        } => {
            assert_eq!(status, 500);
            assert_eq!(data, ResponseBody::Text("oops".into()));
            assert_eq!(message, FALLBACK_MESSAGE);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn bearer_token_is_sent_when_required() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/orders")
            .header("authorization", "Bearer stored-token");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"items":[],"total":0}"#);
    });

    client(&server, Some("stored-token"))
        .dispatcher()
        .dispatch("/orders", Method::GET, NO_BODY, true)
        .await
        .unwrap();
    mock.assert();
}

#[tokio::test]
async fn missing_token_still_sends_the_request() {
    let server = MockServer::start();
    // Declared first so it wins if an Authorization header slips through.
    let authed = server.mock(|when, then| {
        when.path("/api/orders").header_exists("authorization");
        then.status(418);
    });
    let plain = server.mock(|when, then| {
        when.method(GET).path("/api/orders");
        then.status(200)
            .header("content-type", "application/json")
            .body("[]");
    });

    let body = client(&server, None)
        .dispatcher()
        .dispatch("/orders", Method::GET, NO_BODY, true)
        .await
        .unwrap();
    assert_eq!(body, ResponseBody::Json(json!([])));
    assert_eq!(authed.hits(), 0);
    plain.assert();
}

#[tokio::test]
async fn public_call_omits_token_even_when_stored() {
    let server = MockServer::start();
    let authed = server.mock(|when, then| {
        when.path("/api/auth/login").header_exists("authorization");
        then.status(418);
    });
    let plain = server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"token":"fresh"}"#);
    });

    client(&server, Some("old-token"))
        .dispatcher()
        .dispatch("/auth/login", Method::POST, Some(&json!({})), false)
        .await
        .unwrap();
    assert_eq!(authed.hits(), 0);
    plain.assert();
}

#[tokio::test]
async fn delete_never_sends_the_payload() {
    let server = MockServer::start();
    let with_body = server.mock(|when, then| {
        when.path("/api/orders/3").body_contains("leak");
        then.status(418);
    });
    let plain = server.mock(|when, then| {
        when.method(DELETE).path("/api/orders/3");
        then.status(200);
    });

    let body = client(&server, None)
        .dispatcher()
        .dispatch("/orders/3", Method::DELETE, Some(&json!({ "leak": true })), false)
        .await
        .unwrap();
    assert_eq!(body, ResponseBody::Text(String::new()));
    assert_eq!(with_body.hits(), 0);
    plain.assert();
}

#[tokio::test]
async fn patch_sends_the_payload() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::PATCH)
            .path("/api/orders/3")
            .json_body(json!({ "status": "ready" }));
        then.status(204);
    });

    client(&server, None)
        .dispatcher()
        .dispatch("/orders/3", Method::PATCH, Some(&json!({ "status": "ready" })), false)
        .await
        .unwrap();
    mock.assert();
}

#[tokio::test]
async fn malformed_json_is_a_transport_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/orders");
        then.status(200)
            .header("content-type", "application/json")
            .body("<html>");
    });

    let err = client(&server, None)
        .dispatcher()
        .dispatch("/orders", Method::GET, NO_BODY, false)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let port = find_free_port();
    let client = OrdersClient::new(&format!("http://127.0.0.1:{port}/api")).unwrap();
    let err = client
        .dispatcher()
        .dispatch("/orders", Method::GET, NO_BODY, false)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn cookies_are_replayed_in_include_mode() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200)
            .header("set-cookie", "sid=42; Path=/")
            .header("content-type", "application/json")
            .body(r#"{"token":"t"}"#);
    });
    let with_cookie = server.mock(|when, then| {
        when.method(GET).path("/api/orders").header("cookie", "sid=42");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"items":[],"total":0}"#);
    });

    let client = client(&server, None);
    client.auth().login("u", "p").await.unwrap();
    client.orders().get_orders().await.unwrap();
    with_cookie.assert();
}

#[tokio::test]
async fn cookies_are_dropped_in_omit_mode() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200)
            .header("set-cookie", "sid=42; Path=/")
            .header("content-type", "application/json")
            .body(r#"{"token":"t"}"#);
    });
    let with_cookie = server.mock(|when, then| {
        when.path("/api/orders").header_exists("cookie");
        then.status(418);
    });
    let plain = server.mock(|when, then| {
        when.method(GET).path("/api/orders");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"items":[],"total":0}"#);
    });

    let client = OrdersClient::builder(&server.url("/api"))
        .unwrap()
        .with_credentials_mode(CredentialsMode::Omit)
        .build()
        .unwrap();
    client.auth().login("u", "p").await.unwrap();
    client.orders().get_orders().await.unwrap();
    assert_eq!(with_cookie.hits(), 0);
    plain.assert();
}
