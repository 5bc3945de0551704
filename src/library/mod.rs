pub mod builtin;
pub mod generate;

use serde::Serialize;

use self::generate::GenerationRule;

/// One entry of the common-pattern registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub canonical: &'static str,
    pub description: &'static str,
    pub examples: &'static [&'static str],
}

/// Immutable registry of named canonical patterns. Powers recognition
/// (`explain` tags a pattern it knows) and description-to-pattern
/// generation. Built once and never mutated.
pub struct PatternLibrary {
    patterns: Vec<PatternDescriptor>,
    rules: Vec<Box<dyn GenerationRule>>,
}

impl PatternLibrary {
    pub fn new(patterns: Vec<PatternDescriptor>, rules: Vec<Box<dyn GenerationRule>>) -> Self {
        Self { patterns, rules }
    }

    /// Registry with the built-in descriptors and generation rules.
    pub fn builtin() -> Self {
        Self::new(builtin::patterns(), generate::default_rules())
    }

    pub fn patterns(&self) -> &[PatternDescriptor] {
        &self.patterns
    }

    pub fn by_id(&self, id: &str) -> Option<&PatternDescriptor> {
        self.patterns.iter().find(|d| d.id == id)
    }

    /// Identify a pattern against the registry.
    ///
    /// Doubled escape characters are collapsed first, so a pattern pasted
    /// from a string literal (`^\\d{4}$`) still matches its canonical form.
    /// Exact canonical matches win; otherwise a couple of coarse heuristics
    /// catch near-misses of the most common shapes.
    pub fn recognize(&self, pattern: &str) -> Option<&PatternDescriptor> {
        let normalized = pattern.replace("\\\\", "\\");
        if let Some(descriptor) = self.patterns.iter().find(|d| d.canonical == normalized) {
            return Some(descriptor);
        }
        if normalized.contains('@') && normalized.contains("\\.") {
            return self.by_id("email");
        }
        if normalized.contains("http") {
            return self.by_id("url");
        }
        None
    }

    /// Build a pattern from a short natural-language description.
    ///
    /// The rules run in registration order over the lowercased text; the
    /// first rule that produces a compilable pattern wins. A rule whose
    /// output fails to compile is skipped, not fatal. With no match at all
    /// the catch-all `^.*$` is returned, so the result always compiles.
    pub fn generate(&self, description: &str) -> String {
        let lowered = description.to_lowercase();
        for rule in &self.rules {
            if let Some(pattern) = rule.build(&lowered, self) {
                if fancy_regex::Regex::new(&pattern).is_ok() {
                    return pattern;
                }
            }
        }
        "^.*$".to_string()
    }
}
