//! Routing error definitions.

use axum::http::StatusCode;
use thiserror::Error;

use crate::template::TemplateError;

/// Errors that terminate a routing decision.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No configured rule fully matches the sub-path.
    #[error("No routing rule is matching path {path}")]
    NoMatchingRule { path: String },

    /// A rule's resolved pattern is not a valid regular expression.
    #[error("Invalid pattern syntax in {pattern:?}: {source}")]
    InvalidPatternSyntax {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The request path contains a malformed percent-encoding.
    #[error("Invalid path {path:?}: {reason}")]
    PathDecode { path: String, reason: String },

    /// The template engine rejected a pattern or endpoint template.
    #[error("Invalid routing template {template:?}: {source}")]
    Template {
        template: String,
        #[source]
        source: TemplateError,
    },
}

impl RoutingError {
    /// Status code reported to the client when this error aborts a request.
    pub fn status(&self) -> StatusCode {
        match self {
            RoutingError::NoMatchingRule { .. } => StatusCode::BAD_REQUEST,
            RoutingError::InvalidPatternSyntax { .. }
            | RoutingError::PathDecode { .. }
            | RoutingError::Template { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client. Server-side failures keep their
    /// detail out of the response body; it is logged instead.
    pub fn client_message(&self) -> String {
        match self {
            RoutingError::NoMatchingRule { path } => {
                format!("No routing rule is matching path {}", path)
            }
            RoutingError::InvalidPatternSyntax { .. } => "Invalid pattern syntax".to_string(),
            RoutingError::PathDecode { .. } => "Invalid path".to_string(),
            RoutingError::Template { .. } => "Invalid routing template".to_string(),
        }
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            RoutingError::NoMatchingRule { .. } => "not_matched",
            RoutingError::InvalidPatternSyntax { .. } => "invalid_pattern",
            RoutingError::PathDecode { .. } => "invalid_path",
            RoutingError::Template { .. } => "invalid_template",
        }
    }
}

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;
