use std::sync::Arc;

use app_status::{routes, IdentityCache, IdentitySource, InstalledPackages, StatusResponder};
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

fn registry() -> Arc<InstalledPackages> {
    Arc::new(InstalledPackages::new().with_package("tornado", "6.0"))
}

fn app(source: IdentitySource) -> Router {
    let responder = StatusResponder::new(source, registry(), Arc::new(IdentityCache::new()));
    routes::status::router("/status", responder)
}

async fn get(app: Router) -> (StatusCode, String, Value) {
    let request = Request::builder()
        .uri("/status")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let body = axum::body::to_bytes(response.into_body(), 10_000)
        .await
        .unwrap();

    (status, content_type, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn explicit_name_and_version() {
    let source = IdentitySource::Explicit { name: "my-application".into(), version: "1.2.3".into() };

    let (status, content_type, body) = get(app(source)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("application/json"));
    assert_eq!(body, json!({ "name": "my-application", "version": "1.2.3", "status": "ok" }));
}

#[tokio::test]
async fn installed_package() {
    let (status, content_type, body) = get(app(IdentitySource::Package("tornado".into()))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("application/json"));
    assert_eq!(body, json!({ "name": "tornado", "version": "6.0", "status": "ok" }));
}

#[tokio::test]
async fn missing_package_is_a_server_error() {
    let (status, content_type, body) = get(app(IdentitySource::Package("not-a-package".into()))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(content_type.starts_with("application/json"));
    assert_eq!(body["status"], "failed");
    assert!(body["name"].is_null());
    assert!(body["version"].is_null());
}

#[tokio::test]
async fn repeated_requests_return_identical_bodies() {
    let app = app(IdentitySource::Package("tornado".into()));

    let first = get(app.clone()).await;
    let second = get(app).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let source = IdentitySource::Explicit { name: "my-application".into(), version: "1.2.3".into() };
    let request = Request::builder()
        .method(Method::POST)
        .uri("/status")
        .body(Body::empty())
        .unwrap();

    let response = app(source).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn serves_over_tcp() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());

    let source = IdentitySource::Explicit { name: "my-application".into(), version: "1.2.3".into() };
    tokio::spawn(async move {
        axum::serve(listener, app(source)).await.unwrap();
    });

    let response = reqwest::Client::new()
        .get(format!("{address}/status"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.headers()[reqwest::header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "my-application");
    assert_eq!(body["version"], "1.2.3");
    assert_eq!(body["status"], "ok");
}
