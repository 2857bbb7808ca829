//! Rule matching.
//!
//! # Responsibilities
//! - Resolve each rule's pattern through the template engine
//! - Compile the resolved pattern and test it against the decoded sub-path
//! - Stop at the first full match
//!
//! # Design Decisions
//! - Configuration order is evaluation order; no specificity sorting
//! - A pattern that fails to compile aborts the whole decision instead of
//!   falling through to later rules
//! - Placeholder-free patterns come pre-compiled from the `RuleSet`

use std::borrow::Cow;

use crate::routing::error::{RoutingError, RoutingResult};
use crate::routing::path::SubPath;
use crate::routing::rule::{CompiledPattern, Rule, RuleEntry, RuleSet};
use crate::template::{TemplateEngine, VariableScope};

/// The winning rule and the pattern it was matched with.
#[derive(Debug)]
pub struct RuleMatch<'r> {
    /// Position of the rule in the rule set.
    pub index: usize,
    pub rule: &'r Rule,
    pub pattern: Cow<'r, CompiledPattern>,
}

/// Find the first rule whose pattern fully matches the decoded sub-path.
pub fn match_rules<'r>(
    rules: &'r RuleSet,
    sub_path: &SubPath,
    scope: &VariableScope,
    engine: &dyn TemplateEngine,
) -> RoutingResult<Option<RuleMatch<'r>>> {
    for (index, entry) in rules.iter().enumerate() {
        let pattern = resolve_pattern(entry, scope, engine)?;
        if pattern.is_full_match(sub_path.decoded()) {
            return Ok(Some(RuleMatch {
                index,
                rule: entry.rule(),
                pattern,
            }));
        }
    }
    Ok(None)
}

fn resolve_pattern<'r>(
    entry: &'r RuleEntry,
    scope: &VariableScope,
    engine: &dyn TemplateEngine,
) -> RoutingResult<Cow<'r, CompiledPattern>> {
    let rule = entry.rule();
    match entry.static_pattern() {
        Some(Ok(pattern)) => Ok(Cow::Borrowed(pattern)),
        Some(Err(source)) => Err(RoutingError::InvalidPatternSyntax {
            pattern: rule.pattern.clone(),
            source: source.clone(),
        }),
        None => {
            let resolved = engine
                .evaluate(&rule.pattern, scope)
                .map_err(|source| RoutingError::Template {
                    template: rule.pattern.clone(),
                    source,
                })?;
            CompiledPattern::compile(&resolved)
                .map(Cow::Owned)
                .map_err(|source| RoutingError::InvalidPatternSyntax {
                    pattern: resolved,
                    source,
                })
        }
    }
}
