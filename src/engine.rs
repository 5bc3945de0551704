use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::executor::{self, TestResult};
use crate::explain::{self, ExplanationResult};
use crate::group::extract_groups;
use crate::library::PatternLibrary;
use crate::safety::SafetyAnalyzer;
use crate::token::tokenize;

/// Per-process sequence number folded into result ids so two analyses of
/// the same pattern in the same second still get distinct ids.
static RESULT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Envelope for a generated pattern, used by the formatters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPattern {
    pub description: String,
    pub pattern: String,
}

/// The stateless facade over the analysis components. Holds only the
/// read-only registries, injected at construction; every call returns a
/// fresh value object and no per-call state survives.
pub struct Engine {
    library: PatternLibrary,
    safety: SafetyAnalyzer,
}

impl Engine {
    pub fn new(library: PatternLibrary, safety: SafetyAnalyzer) -> Self {
        Self { library, safety }
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Tokenize, extract display groups, recognize, and safety-score a
    /// pattern (bare or `/body/flags`), assembling the explanation text.
    ///
    /// Advisory: succeeds even for patterns that would fail to compile;
    /// validity is `test`'s business.
    pub fn explain(&self, pattern_input: &str) -> ExplanationResult {
        let (body, flags) = executor::split_delimited(pattern_input);
        let tokens = tokenize(body);
        let groups = extract_groups(body);
        let common_pattern = self.library.recognize(body).map(|d| d.name.to_string());
        let safety = self.safety.assess(body);
        let explanation = explain::build(&tokens, &groups, common_pattern.as_deref(), flags);
        let analyzed_at = iso_timestamp();
        let id = result_id(body, &analyzed_at);
        ExplanationResult {
            pattern: body.to_string(),
            flags: flags.to_string(),
            tokens,
            groups,
            common_pattern,
            safety,
            explanation,
            id,
            analyzed_at,
        }
    }

    /// Run a pattern against subject text under the executor's time and
    /// count guards.
    pub fn test(&self, pattern_input: &str, subject: &str) -> TestResult {
        executor::run(pattern_input, subject)
    }

    /// Build a compilable pattern from a short description.
    pub fn generate(&self, description: &str) -> String {
        self.library.generate(description)
    }

    /// `generate` plus its input, for display and serialization.
    pub fn generate_report(&self, description: &str) -> GeneratedPattern {
        GeneratedPattern {
            description: description.to_string(),
            pattern: self.generate(description),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(PatternLibrary::builtin(), SafetyAnalyzer::default_rules())
    }
}

/// Stable 16-hex-char id for one analysis result.
fn result_id(pattern: &str, analyzed_at: &str) -> String {
    let seq = RESULT_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut hasher = Sha256::new();
    hasher.update(b"rexplain-result-v1:");
    hasher.update(pattern.as_bytes());
    hasher.update(b":");
    hasher.update(analyzed_at.as_bytes());
    hasher.update(seq.to_le_bytes());
    let hash = hasher.finalize();
    format!("{hash:x}")[..16].to_string()
}

/// ISO-8601 UTC timestamp without pulling in a time dependency.
fn iso_timestamp() -> String {
    use std::time::SystemTime;
    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();
    let (year, month, day) = ymd_from_days(secs / 86_400);
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    format!("{year:04}-{month:02}-{day:02}T{hours:02}:{minutes:02}:{seconds:02}Z")
}

fn ymd_from_days(mut days: u64) -> (u64, u64, u64) {
    let mut year = 1970;
    loop {
        let in_year = if leap(year) { 366 } else { 365 };
        if days < in_year {
            break;
        }
        days -= in_year;
        year += 1;
    }
    let lengths: [u64; 12] = if leap(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };
    let mut month = 1;
    for len in lengths {
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }
    (year, month, days + 1)
}

fn leap(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
