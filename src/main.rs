use std::process;

use clap::Parser;

use rexplain::cli::Args;

fn main() {
    let args = Args::parse();
    match rexplain::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(3);
        }
    }
}
