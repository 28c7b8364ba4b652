//! Conquest -- a dice-driven territory conquest game.
//!
//! This binary reads the player's choices from stdin and writes the game
//! display to stdout. Diagnostics go to stderr, filtered by `RUST_LOG`.

use std::env;
use std::io::{self, BufWriter};
use std::process::ExitCode;

use conquest::config::{CliRequest, GameConfig, USAGE};
use conquest::console;
use conquest::init_logging;

fn main() -> ExitCode {
    init_logging();

    let config = match GameConfig::from_args(env::args().skip(1)) {
        Ok(CliRequest::Play(config)) => config,
        Ok(CliRequest::Help) => {
            eprintln!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match console::run(&config, stdin.lock(), &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "game aborted");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
