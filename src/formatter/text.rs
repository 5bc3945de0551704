use std::io::Write;

use crate::formatter::{Formatter, Report};

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_to(&self, report: &Report, out: &mut dyn Write) {
        match report {
            Report::Explanation(result) => {
                let _ = writeln!(out, "Pattern: {}", result.pattern);
                if !result.flags.is_empty() {
                    let _ = writeln!(out, "Flags:   {}", result.flags);
                }
                let _ = writeln!(out);
                let _ = write!(out, "{}", result.explanation);
                let _ = writeln!(out);
                let verdict = if result.safety.is_dangerous {
                    " (dangerous)"
                } else {
                    ""
                };
                let _ = writeln!(out, "Safety: {}/100{verdict}", result.safety.score);
                for warning in &result.safety.warnings {
                    let _ = writeln!(out, "  {warning}");
                }
            }
            Report::Test(result) => {
                if let Some(error) = &result.error {
                    let _ = writeln!(out, "invalid pattern: {error}");
                    return;
                }
                for (i, m) in result.matches.iter().enumerate() {
                    let _ = writeln!(
                        out,
                        "{}. {:?} at {}",
                        i + 1,
                        m.matched_text,
                        m.index
                    );
                    for (key, value) in &m.groups {
                        let _ = writeln!(out, "     {key} = {value:?}");
                    }
                }
                let count = result.matches.len();
                let match_word = if count == 1 { "match" } else { "matches" };
                let note = if result.truncated {
                    " (stopped at scan limits)"
                } else {
                    ""
                };
                let _ = writeln!(out, "\n{count} {match_word} found{note}");
            }
            Report::Generated(generated) => {
                let _ = writeln!(out, "{}", generated.pattern);
            }
            Report::Patterns(descriptors) => {
                for d in descriptors {
                    let _ = writeln!(out, "{:<12} {:<26} {}", d.id, d.name, d.canonical);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    fn render(report: &Report) -> String {
        let mut buf = Vec::new();
        TextFormatter.format_to(report, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_report_lists_matches_with_groups() {
        let engine = Engine::default();
        let out = render(&Report::Test(engine.test(r"(\d)(\w)", "1a 2b")));
        assert!(out.contains("1. \"1a\" at 0"));
        assert!(out.contains("$1 = \"1\""));
        assert!(out.contains("2 matches found"));
    }

    #[test]
    fn invalid_pattern_renders_inline_error() {
        let engine = Engine::default();
        let out = render(&Report::Test(engine.test("(oops", "x")));
        assert!(out.starts_with("invalid pattern:"));
    }

    #[test]
    fn single_match_is_not_pluralized() {
        let engine = Engine::default();
        let out = render(&Report::Test(engine.test("b+", "abc")));
        assert!(out.contains("1 match found"));
    }

    #[test]
    fn patterns_listing_shows_every_registry_entry() {
        let engine = Engine::default();
        let out = render(&Report::Patterns(engine.library().patterns().to_vec()));
        assert!(out.contains("email"));
        assert!(out.contains("US Social Security Number"));
    }
}
