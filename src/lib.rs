//! Conquest game library.
//!
//! Exposes the territory registry, mission engine, attack resolver, session
//! controller, console protocol and batch autoplay for use by the binaries,
//! integration tests and benchmarks.

pub mod board;
pub mod config;
pub mod console;
pub mod engine;
pub mod mission;
pub mod protocol;
pub mod resolve;
pub mod selfplay;

use tracing_subscriber::EnvFilter;

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
