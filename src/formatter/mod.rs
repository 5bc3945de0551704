pub mod json;
pub mod text;

use std::io::Write;

use crate::engine::GeneratedPattern;
use crate::executor::TestResult;
use crate::explain::ExplanationResult;
use crate::library::PatternDescriptor;

/// One renderable engine result.
#[derive(Debug, Clone)]
pub enum Report {
    Explanation(ExplanationResult),
    Test(TestResult),
    Generated(GeneratedPattern),
    Patterns(Vec<PatternDescriptor>),
}

pub trait Formatter {
    fn format_to(&self, report: &Report, out: &mut dyn Write);

    fn print(&self, report: &Report) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.format_to(report, &mut lock);
    }
}

pub fn create_formatter(format: &str) -> Box<dyn Formatter> {
    match format {
        "json" => Box::new(json::JsonFormatter),
        // "text" and any unknown value
        _ => Box::new(text::TextFormatter),
    }
}
