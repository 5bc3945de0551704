use std::io::Write;

use crate::formatter::{Formatter, Report};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_to(&self, report: &Report, out: &mut dyn Write) {
        let rendered = match report {
            Report::Explanation(result) => serde_json::to_string_pretty(result),
            Report::Test(result) => serde_json::to_string_pretty(result),
            Report::Generated(generated) => serde_json::to_string_pretty(generated),
            Report::Patterns(descriptors) => serde_json::to_string_pretty(descriptors),
        };
        match rendered {
            Ok(json) => {
                let _ = writeln!(out, "{json}");
            }
            Err(e) => {
                let _ = writeln!(out, "{{\"error\":\"serialization failed: {e}\"}}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    fn render(report: &Report) -> serde_json::Value {
        let mut buf = Vec::new();
        JsonFormatter.format_to(report, &mut buf);
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn explanation_serializes_tokens_and_safety() {
        let engine = Engine::default();
        let value = render(&Report::Explanation(engine.explain(r"^\d+$")));
        assert_eq!(value["pattern"], "^\\d+$");
        assert_eq!(value["tokens"][0]["kind"], "anchor");
        assert_eq!(value["safety"]["score"], 100);
        assert_eq!(value["safety"]["is_dangerous"], false);
        assert_eq!(value["id"].as_str().unwrap().len(), 16);
    }

    #[test]
    fn token_kind_uses_camel_case_names() {
        let engine = Engine::default();
        let value = render(&Report::Explanation(engine.explain("[a-z]")));
        assert_eq!(value["tokens"][0]["kind"], "charClass");
    }

    #[test]
    fn test_result_carries_error_field() {
        let engine = Engine::default();
        let value = render(&Report::Test(engine.test("(bad", "x")));
        assert_eq!(value["is_valid"], false);
        assert!(value["error"].is_string());
    }

    #[test]
    fn patterns_serialize_as_an_array() {
        let engine = Engine::default();
        let value = render(&Report::Patterns(engine.library().patterns().to_vec()));
        assert!(value.as_array().unwrap().len() >= 8);
        assert_eq!(value[0]["id"], "email");
    }
}
