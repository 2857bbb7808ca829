//! Template/expression collaborator.
//!
//! # Data Flow
//! ```text
//! rule.pattern / rule.url (template source)
//!     + VariableScope (request view, attributes, group, groupName)
//!     → TemplateEngine::evaluate
//!     → literal regex source / literal endpoint
//! ```
//!
//! # Design Decisions
//! - The routing core only sees the `TemplateEngine` trait; the expression
//!   language is whatever the engine implements
//! - `MiniJinjaEngine` is the bundled engine (`{{ group[0] }}` syntax)
//! - Strings without placeholders are returned untouched, which also lets
//!   the rule set pre-compile static patterns

pub mod engine;
pub mod scope;

use thiserror::Error;

pub use engine::MiniJinjaEngine;
pub use scope::{NamedGroups, RequestView, VariableScope};

/// Error raised by a template engine.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TemplateError {
    message: String,
}

impl TemplateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Evaluates template strings against a per-request variable scope.
pub trait TemplateEngine: Send + Sync {
    /// Substitute every placeholder in `template` using `scope`.
    fn evaluate(&self, template: &str, scope: &VariableScope) -> Result<String, TemplateError>;

    /// Returns true if `template` contains anything the engine would expand.
    fn has_placeholders(&self, template: &str) -> bool {
        template.contains("{{") || template.contains("{%")
    }
}
