pub mod cli;
pub mod engine;
pub mod executor;
pub mod explain;
pub mod formatter;
pub mod group;
pub mod library;
pub mod safety;
pub mod service;
pub mod token;

use anyhow::Result;

use cli::{Args, Command};
use formatter::{Report, create_formatter};
use library::PatternLibrary;
use service::{EngineService, Request, Response};

/// Run one CLI command. Returns the exit code: `explain`, `generate`, and
/// `patterns` exit 0; `test` exits 0 = matched, 1 = no match, 2 = invalid
/// pattern. The binary maps a returned error to exit code 3.
pub fn run(args: Args) -> Result<i32> {
    let formatter = create_formatter(&args.format);

    // Registry listing needs no engine work and no worker.
    if let Command::Patterns = args.command {
        let library = PatternLibrary::builtin();
        formatter.print(&Report::Patterns(library.patterns().to_vec()));
        return Ok(0);
    }

    // Analysis and execution run on the service worker so a pathological
    // input's bounded scan never blocks this thread.
    let mut service = EngineService::spawn();
    let started = std::time::Instant::now();

    let (request, label) = match args.command {
        Command::Explain { pattern } => (Request::Explain { pattern }, "explain"),
        Command::Test { pattern, subject } => (Request::Test { pattern, subject }, "test"),
        Command::Generate { description } => (Request::Generate { description }, "generate"),
        Command::Patterns => unreachable!("handled above"),
    };
    let response = service.call(request)?;

    if args.debug {
        eprintln!("debug: {label} round trip: {:.0?}", started.elapsed());
    }

    let code = match &response {
        Response::Explanation(result) => {
            if args.debug {
                eprintln!(
                    "debug: {} tokens, {} groups, safety {}",
                    result.tokens.len(),
                    result.groups.len(),
                    result.safety.score
                );
            }
            formatter.print(&Report::Explanation(result.clone()));
            0
        }
        Response::Test(result) => {
            if args.debug {
                eprintln!(
                    "debug: {} matches, truncated: {}",
                    result.matches.len(),
                    result.truncated
                );
            }
            formatter.print(&Report::Test(result.clone()));
            if !result.is_valid {
                2
            } else if result.matched {
                0
            } else {
                1
            }
        }
        Response::Generated(generated) => {
            formatter.print(&Report::Generated(generated.clone()));
            0
        }
    };

    Ok(code)
}
