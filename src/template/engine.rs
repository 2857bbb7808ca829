//! MiniJinja-backed template engine.

use minijinja::{escape_formatter, Environment, UndefinedBehavior, Value};

use crate::template::{TemplateEngine, TemplateError, VariableScope};

/// Template engine using MiniJinja expression syntax.
///
/// Undefined variables are errors, so a typo in `groupName["..."]` fails the
/// request instead of silently producing an empty segment. A capture that did
/// not participate in the match renders as empty text.
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_formatter(|out, state, value| {
            if value.is_none() {
                escape_formatter(out, state, &Value::from(""))
            } else {
                escape_formatter(out, state, value)
            }
        });
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MiniJinjaEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniJinjaEngine").finish_non_exhaustive()
    }
}

impl From<minijinja::Error> for TemplateError {
    fn from(err: minijinja::Error) -> Self {
        TemplateError::new(err.to_string())
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn evaluate(&self, template: &str, scope: &VariableScope) -> Result<String, TemplateError> {
        if !self.has_placeholders(template) {
            return Ok(template.to_string());
        }
        Ok(self.env.render_str(template, scope)?)
    }
}
