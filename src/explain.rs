use std::fmt::Write as _;

use serde::Serialize;

use crate::group::CaptureGroup;
use crate::safety::SafetyAssessment;
use crate::token::Token;

/// Full analysis of one pattern: tokens, display groups, recognition,
/// safety verdict, and the assembled explanation text. A fresh value per
/// call; `id` and `analyzed_at` exist so a history layer can key results,
/// storage itself is out of scope.
#[derive(Debug, Clone, Serialize)]
pub struct ExplanationResult {
    pub pattern: String,
    /// Flag letters exactly as supplied, echoed for display only.
    pub flags: String,
    pub tokens: Vec<Token>,
    pub groups: Vec<CaptureGroup>,
    pub common_pattern: Option<String>,
    pub safety: SafetyAssessment,
    pub explanation: String,
    pub id: String,
    /// ISO-8601 UTC timestamp of the analysis.
    pub analyzed_at: String,
}

/// Assemble the human-readable explanation. Pure and deterministic:
/// recognized-pattern header, token lines in scan order, capture groups,
/// then flags.
pub fn build(
    tokens: &[Token],
    groups: &[CaptureGroup],
    common_pattern: Option<&str>,
    flags: &str,
) -> String {
    let mut out = String::new();

    if let Some(name) = common_pattern {
        let _ = writeln!(out, "Matches a known pattern: {name}");
        out.push('\n');
    }

    out.push_str("Pattern breakdown:\n");
    for token in tokens {
        let _ = writeln!(out, "  {} -> {}", token.raw, token.description);
    }

    if !groups.is_empty() {
        out.push('\n');
        out.push_str("Capture groups:\n");
        for group in groups {
            let _ = writeln!(out, "  ${}: {} -> {}", group.index, group.raw, group.description);
        }
    }

    if !flags.is_empty() {
        out.push('\n');
        out.push_str("Flags:\n");
        for flag in flags.chars() {
            let _ = writeln!(out, "  {flag} -> {}", flag_description(flag));
        }
    }

    out
}

fn flag_description(flag: char) -> &'static str {
    match flag {
        'g' => "global: find every match, not just the first",
        'i' => "case-insensitive matching",
        'm' => "multiline: ^ and $ match at line boundaries",
        's' => "dotall: . also matches newline",
        'u' => "unicode mode",
        'x' => "extended: unescaped whitespace is ignored",
        'y' => "sticky: match only from the current position",
        _ => "unrecognized flag",
    }
}
