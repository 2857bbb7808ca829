//! Dynamic routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (raw path, attributes)
//!     → path.rs (strip context path, percent-decode)
//!     → matcher.rs (resolve + compile patterns, first full match)
//!     → captures.rs (positional + named groups)
//!     → resolver.rs (render endpoint template)
//!     → decision.rs (Resolved | PassThrough | RoutingError)
//!
//! Rule compilation (at load):
//!     Rule[]
//!     → RuleSet (keeps configured order)
//!     → pre-compile placeholder-free patterns
//!     → shared via Arc, never mutated
//! ```
//!
//! # Design Decisions
//! - First match wins; configured order is evaluation order
//! - A pattern must match the whole sub-path
//! - Rules are selected on the decoded sub-path, captures come from the raw one
//! - Failures are values (`RoutingError`), never panics

pub mod captures;
pub mod context;
pub mod decision;
pub mod error;
pub mod matcher;
pub mod path;
pub mod resolver;
pub mod rule;

pub use context::{AttributeStore, Attributes, PolicyOutcome, ATTR_CONTEXT_PATH, ATTR_REQUEST_ENDPOINT};
pub use decision::{Decision, DynamicRouter};
pub use error::{RoutingError, RoutingResult};
pub use rule::{Rule, RuleSet};
