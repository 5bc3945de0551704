pub mod rules;

use serde::Serialize;

/// How serious a triggered heuristic is. Controls the deduction size and
/// the label prefixed to the warning text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Info,
    Warning,
    Critical,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Info => "info",
            RiskLevel::Warning => "warning",
            RiskLevel::Critical => "critical",
        }
    }
}

/// A single backtracking-risk heuristic over the raw pattern text.
/// Implementations must be Send + Sync so the analyzer can live on the
/// service worker thread.
pub trait SafetyRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn level(&self) -> RiskLevel;

    /// Points subtracted from the score when the rule triggers.
    fn deduction(&self) -> u32;

    /// Warning text if the pattern exhibits this rule's shape.
    fn check(&self, pattern: &str) -> Option<String>;
}

/// Heuristic ReDoS verdict for one pattern. A syntactic estimate, not a
/// proof: expect false positives and negatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyAssessment {
    /// 100 = no risky shape found, 0 = worst.
    pub score: u32,
    /// True when the score is 50 or below.
    pub is_dangerous: bool,
    pub warnings: Vec<String>,
}

/// Runs every registered rule over a pattern and sums the deductions.
pub struct SafetyAnalyzer {
    rules: Vec<Box<dyn SafetyRule>>,
}

impl SafetyAnalyzer {
    pub fn new(rules: Vec<Box<dyn SafetyRule>>) -> Self {
        Self { rules }
    }

    /// Analyzer with the built-in rule set.
    pub fn default_rules() -> Self {
        let mut rules: Vec<Box<dyn SafetyRule>> = Vec::new();
        rules::register_all(&mut rules);
        Self::new(rules)
    }

    pub fn rules(&self) -> &[Box<dyn SafetyRule>] {
        &self.rules
    }

    /// Score a pattern. All rules run (no short-circuit); deductions sum
    /// and the score floors at 0.
    pub fn assess(&self, pattern: &str) -> SafetyAssessment {
        let mut score: i64 = 100;
        let mut warnings = Vec::new();
        for rule in &self.rules {
            if let Some(text) = rule.check(pattern) {
                score -= i64::from(rule.deduction());
                warnings.push(format!("{}: {text}", rule.level().label()));
            }
        }
        let score = score.max(0) as u32;
        SafetyAssessment {
            score,
            is_dangerous: score <= 50,
            warnings,
        }
    }
}

impl Default for SafetyAnalyzer {
    fn default() -> Self {
        Self::default_rules()
    }
}
