//! Routing rules and compiled patterns.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::template::TemplateEngine;

/// A single pattern-to-endpoint rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rule {
    /// Regex source, possibly containing template placeholders.
    pub pattern: String,

    /// Endpoint template.
    pub url: String,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            url: url.into(),
        }
    }
}

/// A pattern compiled for full-string matching.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    anchored: Regex,
}

impl CompiledPattern {
    /// Compile `source` so that it only matches whole inputs.
    ///
    /// The bare source is compiled first: wrapping can balance an otherwise
    /// invalid source such as `a)|(b`.
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source)?;
        let anchored = Regex::new(&format!(r"\A(?:{})\z", source))?;
        Ok(Self {
            source: source.to_string(),
            anchored,
        })
    }

    /// The regex source as resolved, before anchoring.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, input: &str) -> bool {
        self.anchored.is_match(input)
    }

    /// Capture groups of a full match of `input`.
    pub fn captures<'h>(&self, input: &'h str) -> Option<Captures<'h>> {
        self.anchored.captures(input)
    }

    /// Number of capture groups, not counting the implicit whole-match group.
    pub fn group_count(&self) -> usize {
        self.anchored.captures_len() - 1
    }

    /// Group names declared in the pattern, in declaration order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.anchored.capture_names().flatten()
    }
}

/// A rule plus its pattern, compiled up front when it has no placeholders.
#[derive(Debug)]
pub struct RuleEntry {
    rule: Rule,
    compiled: Option<Result<CompiledPattern, regex::Error>>,
}

impl RuleEntry {
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Pre-compiled pattern, `None` when the pattern must be resolved per
    /// request.
    pub fn static_pattern(&self) -> Option<&Result<CompiledPattern, regex::Error>> {
        self.compiled.as_ref()
    }
}

/// Ordered, immutable list of rules. Evaluation order is insertion order.
#[derive(Debug, Default)]
pub struct RuleSet {
    entries: Vec<RuleEntry>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>, engine: &dyn TemplateEngine) -> Self {
        let entries = rules
            .into_iter()
            .map(|rule| {
                let compiled = if engine.has_placeholders(&rule.pattern) {
                    None
                } else {
                    Some(CompiledPattern::compile(&rule.pattern))
                };
                RuleEntry { rule, compiled }
            })
            .collect();
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
