//! Routing decision.
//!
//! # Responsibilities
//! - Wire path normalization, rule matching, capture extraction and endpoint
//!   resolution together
//! - Translate the result into a pipeline outcome and write the resolved
//!   endpoint into the attribute store
//!
//! # States
//! ```text
//! Start ─(no rules)──────────────────────────────────────▶ PassThrough
//!   │
//!   ▼
//! Normalizing ─(bad escape)──────────────────────────────▶ Invalid
//!   │
//!   ▼
//! Matching ─(bad pattern / template)─────────────────────▶ Invalid
//!   │ └─(no rule)────────────────────────────────────────▶ NotMatched
//!   ▼
//! Extracting → Resolving ─(bad template)─────────────────▶ Invalid
//!   │
//!   ▼
//! Resolved
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::Span;

use crate::config::RoutingConfig;
use crate::observability::metrics;
use crate::routing::captures::extract;
use crate::routing::context::{AttributeStore, PolicyOutcome, ATTR_CONTEXT_PATH, ATTR_REQUEST_ENDPOINT};
use crate::routing::error::{RoutingError, RoutingResult};
use crate::routing::matcher::match_rules;
use crate::routing::path::SubPath;
use crate::routing::resolver::resolve_endpoint;
use crate::routing::rule::{Rule, RuleSet};
use crate::template::{MiniJinjaEngine, RequestView, TemplateEngine, VariableScope};

/// Successful routing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No rules configured; the request continues unrouted.
    PassThrough,
    /// The endpoint the request should be forwarded to.
    Resolved(String),
}

/// Dynamic routing stage.
///
/// Immutable after construction and safe to share across threads. Log events
/// are emitted under the span given at construction.
pub struct DynamicRouter {
    rules: RuleSet,
    engine: Arc<dyn TemplateEngine>,
    span: Span,
}

impl DynamicRouter {
    /// Router using the bundled MiniJinja engine.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self::with_engine(rules, Arc::new(MiniJinjaEngine::new()))
    }

    pub fn with_engine(rules: Vec<Rule>, engine: Arc<dyn TemplateEngine>) -> Self {
        let rules = RuleSet::new(rules, engine.as_ref());
        Self {
            rules,
            engine,
            span: tracing::debug_span!("dynamic_routing"),
        }
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(config.rules.clone().unwrap_or_default())
    }

    /// Emit this router's events under `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Decide where `path` goes. The context path is stripped first; the
    /// request attributes are visible to templates.
    pub fn route_path(
        &self,
        path: &str,
        context_path: &str,
        attributes: BTreeMap<String, String>,
    ) -> RoutingResult<Decision> {
        let result = self.decide(path, context_path, attributes);
        metrics::record_decision(match &result {
            Ok(Decision::PassThrough) => "pass_through",
            Ok(Decision::Resolved(_)) => "resolved",
            Err(err) => err.kind(),
        });
        result
    }

    /// Decide where `path` goes, reading the context path from `attributes`.
    pub fn route(&self, path: &str, attributes: &dyn AttributeStore) -> RoutingResult<Decision> {
        let context_path = attributes.get(ATTR_CONTEXT_PATH).unwrap_or("");
        self.route_path(path, context_path, attributes.snapshot())
    }

    /// Run the stage against a request: write the endpoint and proceed, or
    /// fail the request.
    pub fn apply(&self, path: &str, attributes: &mut dyn AttributeStore) -> PolicyOutcome {
        match self.route(path, &*attributes) {
            Ok(Decision::PassThrough) => PolicyOutcome::Proceed,
            Ok(Decision::Resolved(endpoint)) => {
                attributes.set(ATTR_REQUEST_ENDPOINT, endpoint);
                PolicyOutcome::Proceed
            }
            Err(err) => PolicyOutcome::Fail {
                status: err.status(),
                message: err.client_message(),
            },
        }
    }

    fn decide(
        &self,
        path: &str,
        context_path: &str,
        attributes: BTreeMap<String, String>,
    ) -> RoutingResult<Decision> {
        if self.rules.is_empty() {
            tracing::debug!(parent: &self.span, path = %path, "No routing rule defined, passing through");
            return Ok(Decision::PassThrough);
        }

        let sub_path = SubPath::from_request(path, context_path).inspect_err(|err| {
            tracing::error!(parent: &self.span, path = %path, error = %err, "Unable to decode request path");
        })?;
        tracing::debug!(parent: &self.span, path = %sub_path.raw(), "Dynamic routing for path");

        let mut scope = VariableScope::new(
            RequestView::new(path, context_path, sub_path.raw()),
            attributes,
        );

        let matched = match match_rules(&self.rules, &sub_path, &scope, self.engine.as_ref()) {
            Ok(Some(matched)) => matched,
            Ok(None) => {
                tracing::warn!(parent: &self.span, path = %sub_path.raw(), "No defined rule is matching path");
                return Err(RoutingError::NoMatchingRule {
                    path: sub_path.raw().to_string(),
                });
            }
            Err(err) => {
                tracing::error!(parent: &self.span, path = %sub_path.raw(), error = %err, "Invalid routing rule");
                return Err(err);
            }
        };

        tracing::debug!(
            parent: &self.span,
            path = %sub_path.raw(),
            rule = matched.index,
            pattern = %matched.rule.pattern,
            url = %matched.rule.url,
            "Applying rule"
        );

        let outcome = extract(&matched, &sub_path);
        let endpoint = resolve_endpoint(&outcome, &mut scope, self.engine.as_ref()).inspect_err(|err| {
            tracing::error!(parent: &self.span, url = %outcome.rule.url, error = %err, "Unable to resolve endpoint");
        })?;

        tracing::debug!(parent: &self.span, endpoint = %endpoint, "Route request");
        Ok(Decision::Resolved(endpoint))
    }
}

impl std::fmt::Debug for DynamicRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicRouter")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
