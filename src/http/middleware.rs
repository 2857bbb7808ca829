//! Dynamic routing as an axum middleware.
//!
//! # Responsibilities
//! - Hand the raw request path and attributes to the current `DynamicRouter`
//! - Attach the resolved endpoint to the request for later stages
//! - Turn routing failures into HTTP responses (400 / 500)
//!
//! # Design Decisions
//! - The router lives behind an `ArcSwap`; a reload swaps the whole stage and
//!   in-flight requests keep the snapshot they started with
//! - Attributes already present in the request extensions win over the
//!   configured context path

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::RoutingConfig;
use crate::routing::{
    AttributeStore, Attributes, DynamicRouter, PolicyOutcome, ATTR_CONTEXT_PATH, ATTR_REQUEST_ENDPOINT,
};

/// Endpoint chosen by the routing stage, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint(pub String);

/// A router together with the context path it is mounted under.
#[derive(Debug)]
pub struct RoutingStage {
    pub router: DynamicRouter,
    pub context_path: String,
}

impl RoutingStage {
    pub fn from_config(config: &RoutingConfig) -> Self {
        let router = DynamicRouter::from_config(config).with_span(tracing::info_span!(
            "dynamic_routing",
            context_path = %config.context_path
        ));
        Self {
            router,
            context_path: config.context_path.clone(),
        }
    }
}

/// Shared, hot-swappable routing state.
#[derive(Clone)]
pub struct RoutingState {
    stage: Arc<ArcSwap<RoutingStage>>,
}

impl RoutingState {
    pub fn new(config: &RoutingConfig) -> Self {
        Self {
            stage: Arc::new(ArcSwap::from_pointee(RoutingStage::from_config(config))),
        }
    }

    /// Replace the rule set. Requests already being routed are unaffected.
    pub fn reload(&self, config: &RoutingConfig) {
        let stage = RoutingStage::from_config(config);
        tracing::info!(
            rules = stage.router.rules().len(),
            context_path = %stage.context_path,
            "Routing rules reloaded"
        );
        self.stage.store(Arc::new(stage));
    }

    pub fn current(&self) -> Arc<RoutingStage> {
        self.stage.load_full()
    }
}

pub async fn dynamic_routing_middleware(
    State(state): State<RoutingState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let stage = state.current();
    let path = req.uri().path().to_string();
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let mut attributes = req.extensions_mut().remove::<Attributes>().unwrap_or_default();
    if attributes.get(ATTR_CONTEXT_PATH).is_none() {
        attributes.set(ATTR_CONTEXT_PATH, stage.context_path.clone());
    }

    match stage.router.apply(&path, &mut attributes) {
        PolicyOutcome::Proceed => {
            if let Some(endpoint) = attributes.get(ATTR_REQUEST_ENDPOINT) {
                tracing::debug!(request_id = %request_id, path = %path, endpoint = %endpoint, "Request routed");
                req.extensions_mut().insert(ResolvedEndpoint(endpoint.to_string()));
            }
            req.extensions_mut().insert(attributes);
            next.run(req).await
        }
        PolicyOutcome::Fail { status, message } => {
            tracing::warn!(request_id = %request_id, path = %path, status = %status, "Routing failed");
            (status, message).into_response()
        }
    }
}
