//! HTTP host integration.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, request ID, tracing, timeout)
//!     → middleware.rs (dynamic routing stage)
//!         → 400 / 500 on routing failure
//!         → ResolvedEndpoint extension on success
//!     → terminal handler
//! ```

pub mod middleware;
pub mod server;

pub use middleware::{dynamic_routing_middleware, ResolvedEndpoint, RoutingStage, RoutingState};
pub use server::HttpServer;
