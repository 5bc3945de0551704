use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rexplain", version, about = "Explain, safety-check, test, and generate regular expressions")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, global = true, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tokenize a pattern and explain it in natural language
    Explain {
        /// Pattern, bare ("\d+") or delimited ("/\d+/gi")
        pattern: String,
    },
    /// Run a pattern against sample text under time/count bounds.
    /// Exit code: 0 = matched, 1 = no match, 2 = invalid pattern.
    Test {
        /// Pattern, bare or delimited
        pattern: String,
        /// Subject text to scan
        subject: String,
    },
    /// Generate a compilable pattern from a short description
    Generate {
        /// e.g. "email", "5 digits", "4 digits starting with 1,9"
        description: String,
    },
    /// List the built-in common-pattern registry
    Patterns,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_explain_with_global_flags() {
        let args = Args::parse_from(["rexplain", "explain", r"\d+", "--format", "json"]);
        assert_eq!(args.format, "json");
        match args.command {
            Command::Explain { pattern } => assert_eq!(pattern, r"\d+"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_test_with_two_positionals() {
        let args = Args::parse_from(["rexplain", "test", "a+", "aaa"]);
        match args.command {
            Command::Test { pattern, subject } => {
                assert_eq!(pattern, "a+");
                assert_eq!(subject, "aaa");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Args::try_parse_from(["rexplain", "patterns", "--format", "xml"]).is_err());
    }
}
