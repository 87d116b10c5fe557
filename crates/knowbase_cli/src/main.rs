//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `knowbase_core` linkage with a deterministic probe.
//! - `normalize <file>`: parse one language file and print its compiled form.

use knowbase_core::{align_topics, compile_text, parse_text, Lang};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    match args.as_slice() {
        [] => {
            println!("knowbase_core ping={}", knowbase_core::ping());
            println!("knowbase_core version={}", knowbase_core::core_version());
            ExitCode::SUCCESS
        }
        [command, path] if command == "normalize" => match std::fs::read_to_string(path) {
            Ok(raw) => {
                let topics = align_topics(parse_text(&raw), Vec::new());
                eprintln!("topics={}", topics.len());
                println!("{}", compile_text(&topics, Lang::En));
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("failed to read `{path}`: {err}");
                ExitCode::FAILURE
            }
        },
        _ => {
            eprintln!("usage: knowbase_cli [normalize <file>]");
            ExitCode::from(2)
        }
    }
}
