use serde::Serialize;

/// Lexical category of a pattern token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    Escape,
    CharClass,
    Group,
    Quantifier,
    Anchor,
    Alternation,
    Literal,
}

/// One scanned construct of a pattern, with its byte span and a
/// human-readable description.
///
/// For any input, the tokens returned by [`tokenize`] are ordered and tile
/// the pattern exactly: `tokens[0].start == 0`, `tokens[i].end ==
/// tokens[i+1].start`, and the last token ends at `pattern.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub raw: String,
    pub description: String,
    /// Byte offset of the first character of the token.
    pub start: usize,
    /// Byte offset one past the last character of the token.
    pub end: usize,
}

/// Scan a pattern into an ordered, gap-free token sequence.
///
/// Total and best-effort: malformed input (unterminated classes, unbalanced
/// groups) degrades by consuming to end of string instead of erroring.
/// Whether the pattern actually compiles is decided elsewhere.
pub fn tokenize(pattern: &str) -> Vec<Token> {
    let chars: Vec<(usize, char)> = pattern.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (start, c) = chars[i];
        let token = match c {
            '\\' => scan_escape(pattern, &chars, &mut i),
            '[' => scan_char_class(pattern, &chars, &mut i),
            '(' => scan_group(pattern, &chars, &mut i),
            '{' => scan_brace_quantifier(pattern, &chars, &mut i),
            '*' | '+' | '?' => {
                i += 1;
                let description = match c {
                    '*' => "Zero or more times",
                    '+' => "One or more times",
                    _ => "Zero or one time",
                };
                make_token(
                    TokenKind::Quantifier,
                    pattern,
                    start,
                    end_of(pattern, &chars, i),
                    description.to_string(),
                )
            }
            '^' | '$' => {
                i += 1;
                let description = if c == '^' {
                    "Start of string"
                } else {
                    "End of string"
                };
                make_token(
                    TokenKind::Anchor,
                    pattern,
                    start,
                    end_of(pattern, &chars, i),
                    description.to_string(),
                )
            }
            '|' => {
                i += 1;
                make_token(
                    TokenKind::Alternation,
                    pattern,
                    start,
                    end_of(pattern, &chars, i),
                    "OR (alternation)".to_string(),
                )
            }
            '.' => {
                i += 1;
                make_token(
                    TokenKind::Literal,
                    pattern,
                    start,
                    end_of(pattern, &chars, i),
                    "Any character except newline".to_string(),
                )
            }
            other => {
                i += 1;
                make_token(
                    TokenKind::Literal,
                    pattern,
                    start,
                    end_of(pattern, &chars, i),
                    format!("Literal: {other}"),
                )
            }
        };
        tokens.push(token);
    }

    tokens
}

/// Byte offset where the token ending at char index `i` ends.
fn end_of(pattern: &str, chars: &[(usize, char)], i: usize) -> usize {
    chars.get(i).map_or(pattern.len(), |&(off, _)| off)
}

fn make_token(
    kind: TokenKind,
    pattern: &str,
    start: usize,
    end: usize,
    description: String,
) -> Token {
    Token {
        kind,
        raw: pattern[start..end].to_string(),
        description,
        start,
        end,
    }
}

/// `\` plus the following character. A trailing lone backslash becomes a
/// one-character escape token.
fn scan_escape(pattern: &str, chars: &[(usize, char)], i: &mut usize) -> Token {
    let (start, _) = chars[*i];
    *i += 1;
    let description = if *i < chars.len() {
        let (_, escaped) = chars[*i];
        *i += 1;
        escape_description(escaped)
    } else {
        "Escape with nothing to escape".to_string()
    };
    make_token(
        TokenKind::Escape,
        pattern,
        start,
        end_of(pattern, chars, *i),
        description,
    )
}

fn escape_description(c: char) -> String {
    match c {
        'd' => "Digit (0-9)".to_string(),
        'D' => "Non-digit".to_string(),
        'w' => "Word character (letter, digit, underscore)".to_string(),
        'W' => "Non-word character".to_string(),
        's' => "Whitespace".to_string(),
        'S' => "Non-whitespace".to_string(),
        'b' => "Word boundary".to_string(),
        'B' => "Non-word-boundary".to_string(),
        'n' => "Newline".to_string(),
        't' => "Tab".to_string(),
        'r' => "Carriage return".to_string(),
        other => format!("Escaped: {other}"),
    }
}

/// `[...]` through the matching unescaped `]`, or to end of string when
/// unterminated.
fn scan_char_class(pattern: &str, chars: &[(usize, char)], i: &mut usize) -> Token {
    let (start, _) = chars[*i];
    *i += 1;
    let content_start = *i;
    while *i < chars.len() {
        match chars[*i].1 {
            '\\' => *i += 2,
            ']' => break,
            _ => *i += 1,
        }
    }
    let content: String = chars[content_start..(*i).min(chars.len())]
        .iter()
        .map(|&(_, c)| c)
        .collect();
    if *i < chars.len() {
        *i += 1; // consume ']'
    }
    make_token(
        TokenKind::CharClass,
        pattern,
        start,
        end_of(pattern, chars, *i),
        char_class_description(&content),
    )
}

/// Synthesize a description from the class body: leading `^` negation,
/// `x-y` ranges, shorthand classes, and any leftover literal characters.
fn char_class_description(content: &str) -> String {
    let (negated, body) = match content.strip_prefix('^') {
        Some(rest) => (true, rest),
        None => (false, content),
    };

    let items: Vec<char> = body.chars().collect();
    let mut parts: Vec<String> = Vec::new();
    let mut literals = String::new();
    let mut j = 0;
    while j < items.len() {
        match items[j] {
            '\\' if j + 1 < items.len() => {
                parts.push(match items[j + 1] {
                    'd' => "digits".to_string(),
                    'w' => "word characters".to_string(),
                    's' => "whitespace".to_string(),
                    other => format!("escaped '{other}'"),
                });
                j += 2;
            }
            c if j + 2 < items.len() && items[j + 1] == '-' => {
                parts.push(format!("{c} to {}", items[j + 2]));
                j += 3;
            }
            c => {
                literals.push(c);
                j += 1;
            }
        }
    }
    if !literals.is_empty() {
        parts.push(format!("one of \"{literals}\""));
    }

    let listed = if parts.is_empty() {
        "nothing".to_string()
    } else {
        parts.join(", ")
    };
    if negated {
        format!("Any character except: {listed}")
    } else {
        format!("Any one of: {listed}")
    }
}

/// `(...)` through the matching unescaped `)` (depth-counted), or to end of
/// string when unbalanced.
fn scan_group(pattern: &str, chars: &[(usize, char)], i: &mut usize) -> Token {
    let (start, _) = chars[*i];
    *i += 1;
    let content_start = *i;
    let mut depth = 1;
    while *i < chars.len() && depth > 0 {
        match chars[*i].1 {
            '\\' => *i += 2,
            '(' => {
                depth += 1;
                *i += 1;
            }
            ')' => {
                depth -= 1;
                *i += 1;
            }
            _ => *i += 1,
        }
    }
    let content_end = if depth == 0 {
        (*i - 1).min(chars.len())
    } else {
        chars.len()
    };
    let content: String = chars[content_start..content_end.max(content_start)]
        .iter()
        .map(|&(_, c)| c)
        .collect();
    make_token(
        TokenKind::Group,
        pattern,
        start,
        end_of(pattern, chars, *i),
        group_description(&content),
    )
}

fn group_description(content: &str) -> String {
    if let Some(rest) = content.strip_prefix("?:") {
        format!("Non-capturing group: {rest}")
    } else if let Some(rest) = content.strip_prefix("?=") {
        format!("Positive lookahead: followed by {rest}")
    } else if let Some(rest) = content.strip_prefix("?!") {
        format!("Negative lookahead: not followed by {rest}")
    } else if let Some(rest) = content.strip_prefix("?<=") {
        format!("Positive lookbehind: preceded by {rest}")
    } else if let Some(rest) = content.strip_prefix("?<!") {
        format!("Negative lookbehind: not preceded by {rest}")
    } else if content.starts_with("?<") || content.starts_with("?P<") {
        let name: String = content
            .chars()
            .skip_while(|&c| c != '<')
            .skip(1)
            .take_while(|&c| c != '>')
            .collect();
        format!("Named capturing group '{name}'")
    } else {
        format!("Capturing group: {content}")
    }
}

/// `{...}` through the next `}`, or to end of string when unterminated.
fn scan_brace_quantifier(pattern: &str, chars: &[(usize, char)], i: &mut usize) -> Token {
    let (start, _) = chars[*i];
    *i += 1;
    let content_start = *i;
    while *i < chars.len() && chars[*i].1 != '}' {
        *i += 1;
    }
    let content: String = chars[content_start..(*i).min(chars.len())]
        .iter()
        .map(|&(_, c)| c)
        .collect();
    if *i < chars.len() {
        *i += 1; // consume '}'
    }
    make_token(
        TokenKind::Quantifier,
        pattern,
        start,
        end_of(pattern, chars, *i),
        brace_description(&content),
    )
}

fn brace_description(content: &str) -> String {
    if let Some((min, max)) = content.split_once(',') {
        let min = min.trim();
        let max = max.trim();
        if max.is_empty() {
            if min.chars().all(|c| c.is_ascii_digit()) && !min.is_empty() {
                return format!("At least {min} times");
            }
        } else if min.chars().all(|c| c.is_ascii_digit())
            && max.chars().all(|c| c.is_ascii_digit())
            && !min.is_empty()
        {
            return format!("Between {min} and {max} times");
        }
    } else if content.chars().all(|c| c.is_ascii_digit()) && !content.is_empty() {
        return format!("Exactly {content} times");
    }
    format!("Repetition: {{{content}}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(pattern: &str) {
        let tokens = tokenize(pattern);
        let mut expected_start = 0;
        for t in &tokens {
            assert_eq!(t.start, expected_start, "gap or overlap in {pattern:?}");
            assert!(t.end > t.start, "empty token in {pattern:?}");
            assert_eq!(&pattern[t.start..t.end], t.raw);
            expected_start = t.end;
        }
        assert_eq!(expected_start, pattern.len(), "tokens must tile {pattern:?}");
    }

    #[test]
    fn empty_pattern_yields_no_tokens() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn tiling_holds_for_representative_patterns() {
        for p in [
            r"^\d{3}-\d{2}$",
            r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}",
            r"(?:ab|cd)*",
            r"(?<year>\d{4})-(?<month>\d{2})",
            r"a|b|c",
            r"\",
            r"[unterminated",
            r"(unbalanced",
            r"{5",
            "héllo\u{1F600}*",
        ] {
            tiles(p);
        }
    }

    #[test]
    fn escape_kinds_and_descriptions() {
        let tokens = tokenize(r"\d\q");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Escape);
        assert_eq!(tokens[0].description, "Digit (0-9)");
        assert_eq!(tokens[1].description, "Escaped: q");
    }

    #[test]
    fn char_class_describes_ranges_and_negation() {
        let tokens = tokenize(r"[a-zA-Z0-9_]");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::CharClass);
        assert_eq!(
            tokens[0].description,
            "Any one of: a to z, A to Z, 0 to 9, one of \"_\""
        );

        let negated = tokenize(r"[^\d]");
        assert_eq!(negated[0].description, "Any character except: digits");
    }

    #[test]
    fn group_descriptions_distinguish_lookaround() {
        let cases = [
            (r"(?:abc)", "Non-capturing group: abc"),
            (r"(?=x)", "Positive lookahead: followed by x"),
            (r"(?!x)", "Negative lookahead: not followed by x"),
            (r"(?<=x)", "Positive lookbehind: preceded by x"),
            (r"(?<!x)", "Negative lookbehind: not preceded by x"),
            (r"(?<y>x)", "Named capturing group 'y'"),
            (r"(abc)", "Capturing group: abc"),
        ];
        for (pattern, expected) in cases {
            let tokens = tokenize(pattern);
            assert_eq!(tokens.len(), 1, "{pattern}");
            assert_eq!(tokens[0].kind, TokenKind::Group);
            assert_eq!(tokens[0].description, expected);
        }
    }

    #[test]
    fn nested_group_is_one_token() {
        let tokens = tokenize(r"((a)(b))c");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].raw, "((a)(b))");
        assert_eq!(tokens[1].raw, "c");
    }

    #[test]
    fn brace_quantifier_shapes() {
        assert_eq!(tokenize("{3}")[0].description, "Exactly 3 times");
        assert_eq!(tokenize("{2,}")[0].description, "At least 2 times");
        assert_eq!(tokenize("{2,5}")[0].description, "Between 2 and 5 times");
        assert_eq!(tokenize("{x}")[0].description, "Repetition: {x}");
    }

    #[test]
    fn bare_quantifiers_and_anchors() {
        let tokens = tokenize("^a*$");
        assert_eq!(tokens[0].kind, TokenKind::Anchor);
        assert_eq!(tokens[2].kind, TokenKind::Quantifier);
        assert_eq!(tokens[2].description, "Zero or more times");
        assert_eq!(tokens[3].kind, TokenKind::Anchor);
    }

    #[test]
    fn dot_is_a_literal_kind() {
        let tokens = tokenize(".");
        assert_eq!(tokens[0].kind, TokenKind::Literal);
        assert_eq!(tokens[0].description, "Any character except newline");
    }

    #[test]
    fn unterminated_class_consumes_to_end() {
        let tokens = tokenize(r"[abc");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].raw, "[abc");
        assert_eq!(tokens[0].end, 4);
    }
}
