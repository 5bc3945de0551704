use std::sync::LazyLock;

use regex::Regex;

use super::PatternLibrary;

/// One step of the generation cascade. Rules run in registration order
/// over the lowercased description; the first whose pattern compiles wins.
/// Implementations must be Send + Sync so the library can live on the
/// service worker thread.
pub trait GenerationRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// A candidate pattern, or `None` when the description does not match
    /// this rule.
    fn build(&self, description: &str, library: &PatternLibrary) -> Option<String>;
}

/// The built-in cascade: registry keywords first (most specific wording
/// wins), then the dynamic digit-count builders.
pub fn default_rules() -> Vec<Box<dyn GenerationRule>> {
    vec![
        Box::new(KeywordRule {
            name: "Generate/Email",
            keywords: &["email", "e-mail"],
            pattern_id: "email",
        }),
        Box::new(KeywordRule {
            name: "Generate/Url",
            keywords: &["url", "link", "website"],
            pattern_id: "url",
        }),
        Box::new(KeywordRule {
            name: "Generate/Ipv4",
            keywords: &["ipv4", "ip address"],
            pattern_id: "ipv4",
        }),
        Box::new(KeywordRule {
            name: "Generate/IsoDate",
            keywords: &["iso date", "date"],
            pattern_id: "iso-date",
        }),
        Box::new(KeywordRule {
            name: "Generate/Password",
            keywords: &["password"],
            pattern_id: "password",
        }),
        Box::new(KeywordRule {
            name: "Generate/HexColor",
            keywords: &["hex color", "hex colour", "color code", "colour code"],
            pattern_id: "hex-color",
        }),
        Box::new(KeywordRule {
            name: "Generate/Phone",
            keywords: &["phone"],
            pattern_id: "us-phone",
        }),
        Box::new(KeywordRule {
            name: "Generate/Ssn",
            keywords: &["ssn", "social security"],
            pattern_id: "ssn",
        }),
        Box::new(LeadingDigits),
        Box::new(DigitCount),
    ]
}

/// Maps keyword fragments to a registry pattern.
struct KeywordRule {
    name: &'static str,
    keywords: &'static [&'static str],
    pattern_id: &'static str,
}

impl GenerationRule for KeywordRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn build(&self, description: &str, library: &PatternLibrary) -> Option<String> {
        if self.keywords.iter().any(|k| description.contains(k)) {
            library
                .by_id(self.pattern_id)
                .map(|d| d.canonical.to_string())
        } else {
            None
        }
    }
}

/// "N digits starting with X, Y" -> `^[XY]\d{N-1}$`.
struct LeadingDigits;

static LEADING_DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*digits?\s+starting\s+with\s+(\d[\d,\s]*)").unwrap()
});

impl GenerationRule for LeadingDigits {
    fn name(&self) -> &'static str {
        "Generate/LeadingDigits"
    }

    fn build(&self, description: &str, _library: &PatternLibrary) -> Option<String> {
        let caps = LEADING_DIGITS.captures(description)?;
        let count: usize = caps[1].parse().ok()?;
        if count == 0 {
            return None;
        }
        let mut leading = String::new();
        for c in caps[2].chars().filter(char::is_ascii_digit) {
            if !leading.contains(c) {
                leading.push(c);
            }
        }
        if leading.is_empty() {
            return None;
        }
        if count == 1 {
            Some(format!("^[{leading}]$"))
        } else {
            Some(format!("^[{leading}]\\d{{{}}}$", count - 1))
        }
    }
}

/// "N digits" -> `^\d{N}$`.
struct DigitCount;

static DIGIT_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*digits?").unwrap());

impl GenerationRule for DigitCount {
    fn name(&self) -> &'static str {
        "Generate/DigitCount"
    }

    fn build(&self, description: &str, _library: &PatternLibrary) -> Option<String> {
        let caps = DIGIT_COUNT.captures(description)?;
        let count: usize = caps[1].parse().ok()?;
        if count == 0 {
            return None;
        }
        Some(format!("^\\d{{{count}}}$"))
    }
}
