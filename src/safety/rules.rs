use std::sync::LazyLock;

use regex::Regex;

use super::{RiskLevel, SafetyRule};

pub fn register_all(rules: &mut Vec<Box<dyn SafetyRule>>) {
    rules.push(Box::new(NestedQuantifier));
    rules.push(Box::new(ChainedWildcards));
    rules.push(Box::new(OverlappingRuns));
}

/// A quantified group that is itself quantified: `(a*)*`, `(a+)+`,
/// `(a{2,})*`. The classic exponential-backtracking shape.
pub struct NestedQuantifier;

/// Matches an unbounded quantifier (`*`, `+`, `{n,}`) inside a group whose
/// closing paren is followed by another unbounded quantifier. Escaped
/// characters inside the group are skipped as units.
static NESTED_QUANTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((?:[^()\\]|\\.)*(?:[*+]|\{\d+,\})(?:[^()\\]|\\.)*\)(?:[*+]|\{\d+,\})")
        .unwrap()
});

impl SafetyRule for NestedQuantifier {
    fn name(&self) -> &'static str {
        "Safety/NestedQuantifier"
    }

    fn level(&self) -> RiskLevel {
        RiskLevel::Critical
    }

    fn deduction(&self) -> u32 {
        50
    }

    fn check(&self, pattern: &str) -> Option<String> {
        let found = NESTED_QUANTIFIER.find(pattern)?;
        Some(format!(
            "nested quantifiers in `{}` can backtrack exponentially on non-matching input",
            found.as_str()
        ))
    }
}

/// Three or more chained greedy wildcards (`.*.*.*`). Each wildcard can
/// consume the others' text, so failures replay combinatorially.
pub struct ChainedWildcards;

static CHAINED_WILDCARDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\.\*){3,}").unwrap());

impl SafetyRule for ChainedWildcards {
    fn name(&self) -> &'static str {
        "Safety/ChainedWildcards"
    }

    fn level(&self) -> RiskLevel {
        RiskLevel::Warning
    }

    fn deduction(&self) -> u32 {
        20
    }

    fn check(&self, pattern: &str) -> Option<String> {
        if CHAINED_WILDCARDS.is_match(pattern) {
            Some("three or more chained `.*` wildcards force heavy backtracking".to_string())
        } else {
            None
        }
    }
}

/// Adjacent quantified runs that can match the same characters, e.g.
/// `\w+\d+` or `a+a`. Cheap to match but can backtrack more than needed.
pub struct OverlappingRuns;

/// Two directly adjacent quantified loose atoms (shorthand class, bracket
/// class, or `.`).
static ADJACENT_QUANTIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\\[wdsWDS]|\[[^\]]*\]|\.)[+*](?:\\[wdsWDS]|\[[^\]]*\]|\.)[+*]").unwrap()
});

impl SafetyRule for OverlappingRuns {
    fn name(&self) -> &'static str {
        "Safety/OverlappingRuns"
    }

    fn level(&self) -> RiskLevel {
        RiskLevel::Info
    }

    fn deduction(&self) -> u32 {
        5
    }

    fn check(&self, pattern: &str) -> Option<String> {
        if ADJACENT_QUANTIFIED.is_match(pattern) || has_literal_overlap(pattern) {
            Some(
                "adjacent quantified runs can match the same text and may backtrack more than needed"
                    .to_string(),
            )
        } else {
            None
        }
    }
}

/// A quantified literal immediately followed by the same literal (`a+a`,
/// `aa*`): the run boundary is ambiguous.
fn has_literal_overlap(pattern: &str) -> bool {
    let chars: Vec<char> = pattern.chars().collect();
    for i in 1..chars.len().saturating_sub(1) {
        if !matches!(chars[i], '+' | '*') {
            continue;
        }
        let before = chars[i - 1];
        let after = chars[i + 1];
        if before == after && before.is_alphanumeric() {
            // Skip escaped literals; `\d+\d` is already covered above.
            if i >= 2 && chars[i - 2] == '\\' {
                continue;
            }
            return true;
        }
    }
    false
}
