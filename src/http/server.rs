//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the axum Router with the routing stage and middleware layers
//! - Apply routing config updates pushed by the watcher
//! - Serve until the shutdown signal fires
//!
//! The terminal handler only reports the routing decision; forwarding to the
//! resolved endpoint belongs to a later pipeline stage.

use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    middleware,
    response::{IntoResponse, Json},
    routing::any,
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{GatewayConfig, RoutingConfig};
use crate::http::middleware::{dynamic_routing_middleware, ResolvedEndpoint, RoutingState};

/// HTTP front for the routing stage.
pub struct HttpServer {
    router: Router,
    state: RoutingState,
    config: GatewayConfig,
}

impl HttpServer {
    pub fn new(config: GatewayConfig) -> Self {
        let state = RoutingState::new(&config.routing);
        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            state,
            config,
        }
    }

    /// Build the axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: RoutingState) -> Router {
        Router::new()
            .route("/{*path}", any(echo_handler))
            .route("/", any(echo_handler))
            .layer(middleware::from_fn_with_state(state, dynamic_routing_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The axum router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &RoutingState {
        &self.state
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires. Routing sections received
    /// on `updates` replace the active rule set.
    pub async fn run(
        self,
        listener: TcpListener,
        updates: Option<mpsc::UnboundedReceiver<RoutingConfig>>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        if let Some(mut updates) = updates {
            let state = self.state.clone();
            tokio::spawn(async move {
                while let Some(routing) = updates.recv().await {
                    state.reload(&routing);
                }
            });
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Reports where the request was routed.
async fn echo_handler(request: Request<Body>) -> impl IntoResponse {
    let endpoint = request
        .extensions()
        .get::<ResolvedEndpoint>()
        .map(|e| e.0.clone());

    Json(json!({
        "path": request.uri().path(),
        "endpoint": endpoint,
    }))
}
