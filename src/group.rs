use serde::Serialize;

/// An outermost capturing group with its 1-based display index.
///
/// Display numbering is deliberately "explain-mode": only outermost
/// parenthesized constructs are listed (nested groups stay inside the
/// parent's `raw`), and any group whose content starts with `?`
/// (non-capturing, lookaround, named) is skipped. This can differ from the
/// numbering the compiled regex reports at match time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureGroup {
    pub index: usize,
    pub raw: String,
    pub description: String,
    pub start: usize,
    pub end: usize,
}

/// Scan a pattern for outermost capturing groups, left to right.
///
/// Escaped parens are skipped; a group is recorded when a `)` returns the
/// paren depth from 1 to 0. Unbalanced input degrades: a stray `)` is
/// ignored and an unterminated `(` is never recorded.
pub fn extract_groups(pattern: &str) -> Vec<CaptureGroup> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut outer_start = 0usize;
    let mut chars = pattern.char_indices();

    while let Some((offset, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '(' => {
                if depth == 0 {
                    outer_start = offset;
                }
                depth += 1;
            }
            ')' => {
                if depth == 1 {
                    let end = offset + 1;
                    let raw = &pattern[outer_start..end];
                    let content = &raw[1..raw.len() - 1];
                    if !content.starts_with('?') {
                        groups.push(CaptureGroup {
                            index: groups.len() + 1,
                            raw: raw.to_string(),
                            description: format!("Captures: {content}"),
                            start: outer_start,
                            end,
                        });
                    }
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_outermost_groups_in_order() {
        let groups = extract_groups(r"(\d{3})-(\d{2})-(\d{4})");
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].index, 1);
        assert_eq!(groups[0].raw, r"(\d{3})");
        assert_eq!(groups[1].index, 2);
        assert_eq!(groups[2].index, 3);
        assert_eq!(groups[2].raw, r"(\d{4})");
    }

    #[test]
    fn nested_groups_stay_inside_the_parent() {
        let groups = extract_groups(r"((a)(b))c(d)");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].raw, "((a)(b))");
        assert_eq!(groups[1].raw, "(d)");
        assert_eq!(groups[1].index, 2);
    }

    #[test]
    fn question_prefixed_groups_are_excluded() {
        assert!(extract_groups(r"(?:ab)(?=c)(?<name>d)").is_empty());
        let mixed = extract_groups(r"(?:x)(y)");
        assert_eq!(mixed.len(), 1);
        assert_eq!(mixed[0].index, 1);
        assert_eq!(mixed[0].raw, "(y)");
    }

    #[test]
    fn escaped_parens_are_not_groups() {
        assert!(extract_groups(r"\(abc\)").is_empty());
        let groups = extract_groups(r"\((x)\)");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].raw, "(x)");
    }

    #[test]
    fn unbalanced_input_degrades_quietly() {
        assert!(extract_groups(r"(never closed").is_empty());
        assert!(extract_groups(r"stray)").is_empty());
        let groups = extract_groups(r"(a))(b)");
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn spans_cover_the_group_text() {
        let pattern = r"xx(ab)yy";
        let groups = extract_groups(pattern);
        assert_eq!(groups[0].start, 2);
        assert_eq!(groups[0].end, 6);
        assert_eq!(&pattern[groups[0].start..groups[0].end], "(ab)");
    }
}
