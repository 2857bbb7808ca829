//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML/JSON)
//!     → loader.rs (parse & deserialize)
//!     → GatewayConfig (immutable)
//!     → RoutingConfig → DynamicRouter, shared via Arc
//!
//! On file change (optional):
//!     watcher.rs detects change
//!     → loader.rs loads the routing section
//!     → new DynamicRouter built and swapped atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes replace the whole rule set
//! - All fields have defaults to allow minimal configs
//! - Rules are not validated at load time; a broken pattern fails the
//!   requests that reach it

pub mod loader;
pub mod schema;
pub mod watcher;

pub use loader::{load_config, load_routing, ConfigError};
pub use schema::{GatewayConfig, ListenerConfig, ObservabilityConfig, RoutingConfig, TimeoutConfig};
