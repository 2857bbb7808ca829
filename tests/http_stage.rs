//! The routing stage behind the axum server.

use axum::http::StatusCode;
use dynamic_router::routing::Attributes;
use dynamic_router::HttpServer;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_resolved_endpoint_reaches_handler() {
    let server = HttpServer::new(common::gateway(
        "/products",
        &[("/foo/(.*)", "http://host1/{{ group[0] }}")],
    ));

    let response = server.router().oneshot(common::get("/products/foo/bar")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body = common::body_json(response).await;
    assert_eq!(body["endpoint"], "http://host1/bar");
    assert_eq!(body["path"], "/products/foo/bar");
}

#[tokio::test]
async fn test_no_matching_rule_returns_400() {
    let server = HttpServer::new(common::gateway("/products", &[("/mag/", "http://host1/product")]));

    let response = server.router().oneshot(common::get("/products/v1/ecom/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::body_string(response).await,
        "No routing rule is matching path /v1/ecom/"
    );
}

#[tokio::test]
async fn test_invalid_pattern_returns_500() {
    let server = HttpServer::new(common::gateway(
        "",
        &[("/ecom/($12[a-/search.*)", "http://host1/api/ecom")],
    ));

    let response = server.router().oneshot(common::get("/ecom/2124%3B2125")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(common::body_string(response).await, "Invalid pattern syntax");
}

#[tokio::test]
async fn test_malformed_path_returns_500() {
    let server = HttpServer::new(common::gateway("", &[("/.*", "http://host1/")]));

    let response = server.router().oneshot(common::get("/foo%zz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(common::body_string(response).await, "Invalid path");
}

#[tokio::test]
async fn test_without_rules_request_passes_through() {
    let server = HttpServer::new(dynamic_router::GatewayConfig::default());

    let response = server.router().oneshot(common::get("/products/ecom/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert!(body["endpoint"].is_null());
}

#[tokio::test]
async fn test_reload_swaps_rules() {
    let server = HttpServer::new(common::gateway("", &[("/old", "http://old/")]));
    let router = server.router();

    let response = router.clone().oneshot(common::get("/new")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    server.state().reload(&common::routing("", &[("/new", "http://new/")]));

    let response = router.oneshot(common::get("/new")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["endpoint"], "http://new/");
}

#[tokio::test]
async fn test_request_attributes_override_context_path() {
    let server = HttpServer::new(common::gateway(
        "/products",
        &[("/v1/(.*)", "http://host1/{{ group[0] }}")],
    ));

    let mut request = common::get("/api/v1/list");
    request.extensions_mut().insert(Attributes::with_context_path("/api"));

    let response = server.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["endpoint"], "http://host1/list");
}
