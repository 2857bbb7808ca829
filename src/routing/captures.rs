//! Capture group extraction from the winning rule.

use crate::routing::matcher::RuleMatch;
use crate::routing::path::SubPath;
use crate::routing::rule::Rule;
use crate::template::NamedGroups;

/// Selected rule with the values captured from the sub-path.
#[derive(Debug, Clone)]
pub struct MatchOutcome<'r> {
    /// Position of the rule in the rule set.
    pub index: usize,
    pub rule: &'r Rule,
    /// `group[0]` is regex group 1. `None` for a group that did not
    /// participate in the match.
    pub group: Vec<Option<String>>,
    /// Every name declared in the pattern, captured or not.
    pub group_name: NamedGroups,
}

/// Extract positional and named captures.
///
/// Values are read from the raw sub-path so that encoded characters reach the
/// endpoint untouched. If the raw form does not match on its own (the pattern
/// relies on a decoded character), the decoded form is used instead.
pub fn extract<'r>(matched: &RuleMatch<'r>, sub_path: &SubPath) -> MatchOutcome<'r> {
    let pattern = &matched.pattern;
    let captures = pattern
        .captures(sub_path.raw())
        .or_else(|| pattern.captures(sub_path.decoded()));

    let group_count = pattern.group_count();
    let mut group = Vec::with_capacity(group_count);
    let mut group_name = NamedGroups::new();

    match captures {
        Some(caps) => {
            group.extend((1..=group_count).map(|i| caps.get(i).map(|m| m.as_str().to_string())));
            for name in pattern.group_names() {
                group_name.insert(name, caps.name(name).map(|m| m.as_str().to_string()));
            }
        }
        None => {
            group.resize(group_count, None);
            for name in pattern.group_names() {
                group_name.insert(name, None);
            }
        }
    }

    MatchOutcome {
        index: matched.index,
        rule: matched.rule,
        group,
        group_name,
    }
}
