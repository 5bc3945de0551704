use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;
use serde::Serialize;

/// Hard cap on recorded matches per run.
pub const MAX_MATCHES: usize = 500;

/// Wall-clock budget for one run. Both the pattern and the subject are
/// untrusted; a backtracking pattern must not scan forever.
pub const TIMEOUT_MS: u64 = 2_000;

/// One match found in the subject text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchInstance {
    pub matched_text: String,
    /// Byte offset of the match in the subject.
    pub index: usize,
    /// `"$1".."$n"` for every numbered group the compiled regex reports
    /// (a group that did not participate maps to the empty string), plus
    /// named-group keys verbatim. This numbering is the engine's own and
    /// can differ from the explain-mode display groups.
    pub groups: BTreeMap<String, String>,
}

/// Outcome of running a pattern against sample text. Compile failures are
/// carried in `error`; this function never panics on untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestResult {
    pub pattern: String,
    pub subject: String,
    pub is_valid: bool,
    pub matched: bool,
    pub matches: Vec<MatchInstance>,
    /// True when the scan stopped on a guard (match cap, time budget, or
    /// the engine's backtrack limit) rather than input exhaustion.
    pub truncated: bool,
    pub error: Option<String>,
}

static DELIMITED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^/(.*)/([a-zA-Z]*)$").unwrap());

/// Split `/body/flags` input into body and flags. Anything not in
/// delimited form is a bare body with no flags.
pub fn split_delimited(input: &str) -> (&str, &str) {
    match DELIMITED.captures(input) {
        Some(caps) => {
            let body = caps.get(1).map_or("", |m| m.as_str());
            let flags = caps.get(2).map_or("", |m| m.as_str());
            (body, flags)
        }
        None => (input, ""),
    }
}

/// Compile a body with its flag letters. The semantic flags `i m s x` are
/// applied as an inline prefix; `g` is implicit (the scan is always
/// iterative) and anything else is display-only.
fn compile(body: &str, flags: &str) -> Result<fancy_regex::Regex, fancy_regex::Error> {
    let mut inline = String::new();
    for flag in flags.chars() {
        if matches!(flag, 'i' | 'm' | 's' | 'x') && !inline.contains(flag) {
            inline.push(flag);
        }
    }
    if inline.is_empty() {
        fancy_regex::Regex::new(body)
    } else {
        fancy_regex::Regex::new(&format!("(?{inline}){body}"))
    }
}

/// Run a pattern (bare or `/body/flags`) against subject text under the
/// time and count guards.
pub fn run(pattern_input: &str, subject: &str) -> TestResult {
    let (body, flags) = split_delimited(pattern_input);

    let regex = match compile(body, flags) {
        Ok(regex) => regex,
        Err(e) => {
            return TestResult {
                pattern: pattern_input.to_string(),
                subject: subject.to_string(),
                is_valid: false,
                matched: false,
                matches: Vec::new(),
                truncated: false,
                error: Some(e.to_string()),
            };
        }
    };

    let started = Instant::now();
    let budget = Duration::from_millis(TIMEOUT_MS);
    let mut matches = Vec::new();
    let mut truncated = false;
    let mut pos = 0usize;

    while pos <= subject.len() {
        if matches.len() >= MAX_MATCHES || started.elapsed() >= budget {
            truncated = true;
            break;
        }
        let caps = match regex.captures_from_pos(subject, pos) {
            Ok(Some(caps)) => caps,
            Ok(None) => break,
            // Backtrack limit hit mid-scan: a bounded stop, not a compile
            // error.
            Err(_) => {
                truncated = true;
                break;
            }
        };
        let Some(whole) = caps.get(0) else { break };

        matches.push(MatchInstance {
            matched_text: whole.as_str().to_string(),
            index: whole.start(),
            groups: capture_map(&regex, &caps),
        });

        pos = if whole.end() == whole.start() {
            // Zero-length match: force progress one char so `a*` against
            // non-matching text terminates.
            let advance = subject[whole.end()..].chars().next().map_or(1, char::len_utf8);
            whole.end() + advance
        } else {
            whole.end()
        };
    }

    TestResult {
        pattern: pattern_input.to_string(),
        subject: subject.to_string(),
        is_valid: true,
        matched: !matches.is_empty(),
        matches,
        truncated,
        error: None,
    }
}

fn capture_map(
    regex: &fancy_regex::Regex,
    caps: &fancy_regex::Captures<'_>,
) -> BTreeMap<String, String> {
    let mut groups = BTreeMap::new();
    for i in 1..caps.len() {
        let text = caps.get(i).map_or("", |m| m.as_str());
        groups.insert(format!("${i}"), text.to_string());
    }
    for name in regex.capture_names().flatten() {
        let text = caps.name(name).map_or("", |m| m.as_str());
        groups.insert(name.to_string(), text.to_string());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_delimited_forms() {
        assert_eq!(split_delimited("/abc/gi"), ("abc", "gi"));
        assert_eq!(split_delimited("/a/b/i"), ("a/b", "i"));
        assert_eq!(split_delimited("/abc/"), ("abc", ""));
        assert_eq!(split_delimited("abc"), ("abc", ""));
        assert_eq!(split_delimited("a/b"), ("a/b", ""));
    }

    #[test]
    fn invalid_pattern_reports_error_without_panicking() {
        let result = run("(unclosed", "anything");
        assert!(!result.is_valid);
        assert!(!result.matched);
        assert!(result.matches.is_empty());
        assert!(result.error.is_some());
    }

    #[test]
    fn numbered_groups_are_captured() {
        let result = run(r"(\d{3})-(\d{2})-(\d{4})", "123-45-6789");
        assert!(result.is_valid);
        assert!(result.matched);
        let m = &result.matches[0];
        assert_eq!(m.matched_text, "123-45-6789");
        assert_eq!(m.index, 0);
        assert_eq!(m.groups["$1"], "123");
        assert_eq!(m.groups["$2"], "45");
        assert_eq!(m.groups["$3"], "6789");
    }

    #[test]
    fn named_groups_appear_verbatim() {
        let result = run(r"(?<year>\d{4})-(?<month>\d{2})", "2024-06");
        let m = &result.matches[0];
        assert_eq!(m.groups["year"], "2024");
        assert_eq!(m.groups["month"], "06");
        assert_eq!(m.groups["$1"], "2024");
    }

    #[test]
    fn non_participating_group_maps_to_empty() {
        let result = run(r"(a)|(b)", "a");
        let m = &result.matches[0];
        assert_eq!(m.groups["$1"], "a");
        assert_eq!(m.groups["$2"], "");
    }

    #[test]
    fn scan_is_iterative_regardless_of_flags() {
        let result = run(r"\d+", "a1b22c333");
        assert_eq!(result.matches.len(), 3);
        assert_eq!(result.matches[1].matched_text, "22");
        assert_eq!(result.matches[1].index, 3);
    }

    #[test]
    fn zero_length_matches_terminate() {
        let result = run("a*", "bbb");
        assert!(result.is_valid);
        // One zero-length match per position, including end of string.
        assert_eq!(result.matches.len(), 4);
        assert!(result.matches.iter().all(|m| m.matched_text.is_empty()));
        assert!(!result.truncated);
    }

    #[test]
    fn zero_length_advance_respects_utf8() {
        let result = run("x*", "héé");
        assert!(result.is_valid);
        assert!(result.matches.len() <= MAX_MATCHES);
    }

    #[test]
    fn match_cap_truncates() {
        let subject = "a".repeat(MAX_MATCHES * 2);
        let result = run("a", &subject);
        assert_eq!(result.matches.len(), MAX_MATCHES);
        assert!(result.truncated);
    }

    #[test]
    fn case_insensitive_flag_is_applied() {
        let result = run("/abc/i", "xABCx");
        assert!(result.matched);
        assert_eq!(result.matches[0].matched_text, "ABC");
    }

    #[test]
    fn pathological_pattern_returns_within_budget() {
        let subject = format!("{}!", "a".repeat(40));
        let started = Instant::now();
        let result = run("(a+)+$", &subject);
        // Generous slack over TIMEOUT_MS: the guard may only fire between
        // match attempts and the engine's own backtrack limit can stop the
        // scan first.
        assert!(started.elapsed() < Duration::from_millis(TIMEOUT_MS * 5));
        assert!(result.is_valid);
        assert!(!result.matched);
    }

    #[test]
    fn lookbehind_patterns_compile() {
        let result = run(r"(?<=\$)\d+", "price: $42");
        assert!(result.is_valid);
        assert_eq!(result.matches[0].matched_text, "42");
    }
}
