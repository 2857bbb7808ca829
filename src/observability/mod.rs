//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing decisions
//!     → logging.rs (structured events under the router's span)
//!     → metrics.rs (decision counters)
//! HTTP layer
//!     → tower-http TraceLayer (per-request spans)
//! ```

pub mod logging;
pub mod metrics;
