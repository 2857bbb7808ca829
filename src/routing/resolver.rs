//! Endpoint resolution.
//!
//! Binds the captures into the scope and hands the endpoint template to the
//! template engine. The produced endpoint is not validated here; whether it
//! is an absolute URL or a path fragment is decided downstream.

use crate::routing::captures::MatchOutcome;
use crate::routing::error::{RoutingError, RoutingResult};
use crate::template::{TemplateEngine, VariableScope};

/// Evaluate the winning rule's endpoint template.
pub fn resolve_endpoint(
    outcome: &MatchOutcome<'_>,
    scope: &mut VariableScope,
    engine: &dyn TemplateEngine,
) -> RoutingResult<String> {
    scope.group = outcome.group.clone();
    scope.group_name = outcome.group_name.clone();

    engine
        .evaluate(&outcome.rule.url, scope)
        .map_err(|source| RoutingError::Template {
            template: outcome.rule.url.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::rule::Rule;
    use crate::template::{MiniJinjaEngine, NamedGroups};

    #[test]
    fn test_binds_groups_before_evaluating() {
        let rule = Rule::new(
            "/api/(?<version>v[0-9]+)/ecome.*",
            r#"http://host1/products/api/{{ groupName["version"] }}/{{ group[0] }}"#,
        );
        let mut group_name = NamedGroups::new();
        group_name.insert("version", Some("v12".into()));
        let outcome = MatchOutcome {
            index: 0,
            rule: &rule,
            group: vec![Some("v12".into())],
            group_name,
        };

        let mut scope = VariableScope::default();
        let endpoint = resolve_endpoint(&outcome, &mut scope, &MiniJinjaEngine::new()).unwrap();
        assert_eq!(endpoint, "http://host1/products/api/v12/v12");
        assert_eq!(scope.group, vec![Some("v12".to_string())]);
    }

    #[test]
    fn test_unknown_group_name_is_template_error() {
        let rule = Rule::new("/(.*)", r#"http://host1/{{ groupName["missing"] }}"#);
        let outcome = MatchOutcome {
            index: 0,
            rule: &rule,
            group: vec![Some("x".into())],
            group_name: NamedGroups::new(),
        };

        let err = resolve_endpoint(&outcome, &mut VariableScope::default(), &MiniJinjaEngine::new())
            .unwrap_err();
        assert!(matches!(err, RoutingError::Template { .. }));
    }
}
