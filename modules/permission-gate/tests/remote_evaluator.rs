#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the gate middleware with network dispatch.
//!
//! The evaluator is an `httpmock` server; the wire contract it receives
//! must be byte-for-byte the schema the in-process strategy sends.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::middleware::{Next, from_fn};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use httpmock::prelude::*;
use permission_gate::{PermissionGate, PermissionGateConfig};
use permission_gate_sdk::SecurityContext;
use serde_json::json;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    handler_calls: Arc<AtomicUsize>,
}

/// Simulated authentication layer: the bearer token is the subject id,
/// `no-subject` stands in for a credential without one.
async fn fake_authn(mut req: Request, next: Next) -> Response {
    let subject = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    match subject {
        Some("no-subject") => {
            req.extensions_mut()
                .insert(SecurityContext::authenticated(None));
        }
        Some(subject) => {
            req.extensions_mut()
                .insert(SecurityContext::authenticated(Some(subject.to_owned())));
        }
        None => return StatusCode::UNAUTHORIZED.into_response(),
    }
    next.run(req).await
}

fn build_app(evaluate_permissions_url: &str) -> TestApp {
    let handler_calls = Arc::new(AtomicUsize::new(0));
    let hello_calls = Arc::clone(&handler_calls);

    let routes = Router::new().route(
        "/hello",
        get(move || {
            let hello_calls = Arc::clone(&hello_calls);
            async move {
                hello_calls.fetch_add(1, Ordering::SeqCst);
                "world"
            }
        }),
    );

    let config: PermissionGateConfig = serde_json::from_value(json!({
        "application_id": "app1",
        "evaluate_permissions_url": evaluate_permissions_url,
        "evaluator_timeout_secs": 2,
    }))
    .unwrap();

    let gate = PermissionGate::new(config).expect("gate construction");
    let router = gate.finalize(routes).layer(from_fn(fake_authn));

    TestApp {
        router,
        handler_calls,
    }
}

fn hello_request(bearer: &str) -> Request {
    Request::builder()
        .method("GET")
        .uri("/hello")
        .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn permitted_request_reaches_handler() {
    let server = MockServer::start_async().await;
    // Strict matcher: the wire body and forwarded header are part of the
    // contract, identical to what in-process dispatch sends.
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/evaluatePermissions")
                .header("authorization", "Bearer admin")
                .json_body(json!({
                    "appId": "app1",
                    "agcoUuid": "admin",
                    "name": "hello.get",
                }));
            then.status(200).json_body(json!({"permitted": true}));
        })
        .await;

    let app = build_app(&server.url("/evaluatePermissions"));
    let response = app.router.oneshot(hello_request("admin")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.handler_calls.load(Ordering::SeqCst), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn denied_request_is_rejected_with_403() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/evaluatePermissions");
            then.status(200).json_body(json!({"permitted": false}));
        })
        .await;

    let app = build_app(&server.url("/evaluatePermissions"));
    let response = app.router.oneshot(hello_request("guest")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.handler_calls.load(Ordering::SeqCst), 0);
    mock.assert_async().await;
}

#[tokio::test]
async fn evaluator_non_200_is_rejected_with_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/evaluatePermissions");
            then.status(502).body("bad gateway");
        })
        .await;

    let app = build_app(&server.url("/evaluatePermissions"));
    let response = app.router.oneshot(hello_request("admin")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.handler_calls.load(Ordering::SeqCst), 0);

    // Upstream diagnostics are logged, never echoed to the caller.
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Cannot evaluate permissions");
    assert!(!body.to_string().contains("bad gateway"));
}

#[tokio::test]
async fn malformed_reply_is_rejected_with_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/evaluatePermissions");
            then.status(200).body("not json");
        })
        .await;

    let app = build_app(&server.url("/evaluatePermissions"));
    let response = app.router.oneshot(hello_request("admin")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn reply_without_permitted_field_is_rejected_with_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/evaluatePermissions");
            then.status(200).json_body(json!({"decision": true}));
        })
        .await;

    let app = build_app(&server.url("/evaluatePermissions"));
    let response = app.router.oneshot(hello_request("admin")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unreachable_evaluator_is_rejected_with_500() {
    // Nothing listens on the discard port; the connection is refused.
    let app = build_app("http://127.0.0.1:9/evaluatePermissions");
    let response = app.router.oneshot(hello_request("admin")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.handler_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn subjectless_identity_posts_null_uuid() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/evaluatePermissions")
                .json_body(json!({
                    "appId": "app1",
                    "agcoUuid": null,
                    "name": "hello.get",
                }));
            then.status(200).json_body(json!({"permitted": true}));
        })
        .await;

    let app = build_app(&server.url("/evaluatePermissions"));
    let response = app
        .router
        .oneshot(hello_request("no-subject"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    mock.assert_async().await;
}
