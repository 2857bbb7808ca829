//! Per-request variable scope exposed to templates.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Request values visible to templates as `request.*`.
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    /// Raw request path, context path included.
    pub path: String,
    /// Mount prefix removed before matching.
    pub context_path: String,
    /// Raw sub-path (still percent-encoded).
    pub sub_path: String,
    /// Raw path split on `/`. The leading empty segment is kept so that
    /// `paths[1]` is the first real segment.
    pub paths: Vec<String>,
}

impl RequestView {
    pub fn new(path: &str, context_path: &str, sub_path: &str) -> Self {
        Self {
            path: path.to_string(),
            context_path: context_path.to_string(),
            sub_path: sub_path.to_string(),
            paths: path.split('/').map(str::to_string).collect(),
        }
    }
}

/// Named capture groups in first-declaration order.
///
/// Serialized as a map so templates can index it by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedGroups(Vec<(String, Option<String>)>);

impl NamedGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name. A name already present keeps its first value.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        if !self.0.iter().any(|(n, _)| *n == name) {
            self.0.push((name, value));
        }
    }

    /// Captured value for `name`; `None` if undeclared or not captured.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for NamedGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Variables bound for one routing evaluation.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct VariableScope {
    pub request: RequestView,
    /// Snapshot of the request attribute store.
    pub attributes: BTreeMap<String, String>,
    /// `group[i]` is capture `i + 1`.
    pub group: Vec<Option<String>>,
    #[serde(rename = "groupName")]
    pub group_name: NamedGroups,
}

impl VariableScope {
    pub fn new(request: RequestView, attributes: BTreeMap<String, String>) -> Self {
        Self {
            request,
            attributes,
            group: Vec::new(),
            group_name: NamedGroups::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_paths_keep_leading_segment() {
        let view = RequestView::new("/api/products/42", "/api", "/products/42");
        assert_eq!(view.paths, vec!["", "api", "products", "42"]);
    }

    #[test]
    fn test_named_groups_ignore_duplicates() {
        let mut groups = NamedGroups::new();
        groups.insert("version", Some("v1".into()));
        groups.insert("id", None);
        groups.insert("version", Some("v2".into()));

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.get("version"), Some("v1"));
        assert_eq!(groups.get("id"), None);
        assert!(groups.contains("id"));
        assert_eq!(groups.names().collect::<Vec<_>>(), vec!["version", "id"]);
    }

    #[test]
    fn test_scope_serializes_group_name_in_order() {
        let mut scope = VariableScope::default();
        scope.group = vec![Some("a".into()), None];
        scope.group_name.insert("zeta", Some("z".into()));
        scope.group_name.insert("alpha", None);

        let json = serde_json::to_string(&scope).unwrap();
        assert!(json.contains(r#""group":["a",null]"#));
        assert!(json.contains(r#""groupName":{"zeta":"z","alpha":null}"#));
        assert!(json.contains(r#""contextPath":"""#));
    }
}
