//! Batch autoplay CLI.
//!
//! Plays games with a random legal-attack policy and outputs one JSON record
//! per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of games to play (default: 10)
//!   --max-turns N    Action cap per game (default: 200)
//!   --territories N  Territories on the map (default: 5)
//!   --min-troops N   Smallest starting garrison (default: 3)
//!   --max-troops N   Largest starting garrison (default: 7)
//!   --player COLOR   Faction to play (default: random starting faction)
//!   --threads N      Number of parallel threads (default: 4)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use conquest::init_logging;
use conquest::selfplay::{self, SelfPlayConfig};

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1).map(String::as_str);
        let parsed = match flag {
            "--games" => parse(flag, value).map(|v| config.num_games = v),
            "--max-turns" => parse(flag, value).map(|v| config.max_turns = v),
            "--territories" => parse(flag, value).map(|v| config.territories = v),
            "--min-troops" => parse(flag, value).map(|v| config.min_troops = v),
            "--max-troops" => parse(flag, value).map(|v| config.max_troops = v),
            "--threads" => parse(flag, value).map(|v| config.threads = v),
            "--seed" => parse(flag, value).map(|v| config.seed = v),
            "--player" => parse(flag, value).map(|v| config.player = Some(v)),
            "--output" => parse(flag, value).map(|v| output_path = Some(v)),
            "--quiet" => {
                config.quiet = true;
                i += 1;
                continue;
            }
            "--help" | "-h" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            other => Err(format!("Unknown argument: {}", other)),
        };
        if let Err(msg) = parsed {
            eprintln!("{}", msg);
            print_usage();
            return ExitCode::from(2);
        }
        i += 2;
    }

    if !config.quiet {
        eprintln!(
            "Self-play: {} games, {} territories, max {} turns, {} threads",
            config.num_games, config.territories, config.max_turns, config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            tracing::error!(error = %e, "self-play aborted");
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !config.quiet {
        eprintln!("Completed {} games in {:.1}s", games.len(), start.elapsed().as_secs_f64());
        let summary = selfplay::summarize(&games);
        if let Err(e) = selfplay::write_summary(&summary, &mut io::stderr()) {
            tracing::warn!(error = %e, "failed to print summary");
        }
    }

    let written = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => selfplay::write_jsonl(&games, &mut BufWriter::new(io::stdout().lock())),
    };

    match written {
        Ok(()) => {
            if let (Some(path), false) = (&output_path, config.quiet) {
                eprintln!("Wrote {} games to {}", games.len(), path);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: failed to write output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse<T: FromStr>(flag: &str, value: Option<&str>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("Missing value for {}", flag))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value '{}' for {}", value, flag))
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --max-turns N    Action cap per game (default: 200)");
    eprintln!("  --territories N  Territories on the map (default: 5)");
    eprintln!("  --min-troops N   Smallest starting garrison (default: 3)");
    eprintln!("  --max-troops N   Largest starting garrison (default: 7)");
    eprintln!("  --player COLOR   Faction to play (default: random starting faction)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
