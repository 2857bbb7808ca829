//! Dynamic request routing for an API gateway pipeline.
//!
//! Given a request path and an ordered list of pattern-to-endpoint rules,
//! [`DynamicRouter`] picks the first rule whose pattern fully matches the
//! path (after the context path is removed) and renders that rule's endpoint
//! template with the captured groups.
//!
//! ```
//! use dynamic_router::{Decision, DynamicRouter, Rule};
//!
//! let router = DynamicRouter::new(vec![
//!     Rule::new("/v1/ecom/", "http://host1/product"),
//!     Rule::new("/v1/ecom/(.*)", "http://host2/product/{{ group[0] }}"),
//! ]);
//!
//! let decision = router
//!     .route_path("/products/v1/ecom/search", "/products", Default::default())
//!     .unwrap();
//! assert_eq!(decision, Decision::Resolved("http://host2/product/search".into()));
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod template;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Decision, DynamicRouter, PolicyOutcome, Rule, RoutingError};
pub use template::{MiniJinjaEngine, TemplateEngine};
