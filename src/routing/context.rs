//! Request attribute store and pipeline outcome.

use std::collections::BTreeMap;

use axum::http::StatusCode;

/// Attribute holding the gateway mount prefix of the current API.
pub const ATTR_CONTEXT_PATH: &str = "context-path";

/// Attribute receiving the resolved endpoint.
pub const ATTR_REQUEST_ENDPOINT: &str = "request.endpoint";

/// Per-request key/value store shared by pipeline stages.
pub trait AttributeStore {
    fn get(&self, key: &str) -> Option<&str>;
    fn set(&mut self, key: &str, value: String);

    /// All attributes, for exposure to templates.
    fn snapshot(&self) -> BTreeMap<String, String>;
}

/// In-memory attribute store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    values: BTreeMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the context path already set.
    pub fn with_context_path(context_path: impl Into<String>) -> Self {
        let mut attrs = Self::new();
        attrs.set(ATTR_CONTEXT_PATH, context_path.into());
        attrs
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl AttributeStore for Attributes {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.clone()
    }
}

/// What the pipeline should do after the routing stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyOutcome {
    /// Continue with the next stage.
    Proceed,
    /// Abort the request with this status and message.
    Fail { status: StatusCode, message: String },
}

impl PolicyOutcome {
    pub fn is_proceed(&self) -> bool {
        matches!(self, PolicyOutcome::Proceed)
    }
}
