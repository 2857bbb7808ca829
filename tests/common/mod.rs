//! Shared helpers for integration tests.

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use dynamic_router::config::{GatewayConfig, RoutingConfig};
use dynamic_router::Rule;

/// Build an ordered rule list from `(pattern, url)` pairs.
#[allow(dead_code)]
pub fn rules(pairs: &[(&str, &str)]) -> Vec<Rule> {
    pairs.iter().map(|(p, u)| Rule::new(*p, *u)).collect()
}

/// Routing section with a context path and rules.
#[allow(dead_code)]
pub fn routing(context_path: &str, pairs: &[(&str, &str)]) -> RoutingConfig {
    RoutingConfig {
        context_path: context_path.to_string(),
        rules: Some(rules(pairs)),
    }
}

/// Gateway config with only the routing section set.
#[allow(dead_code)]
pub fn gateway(context_path: &str, pairs: &[(&str, &str)]) -> GatewayConfig {
    GatewayConfig {
        routing: routing(context_path, pairs),
        ..GatewayConfig::default()
    }
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
