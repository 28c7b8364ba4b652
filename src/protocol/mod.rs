//! Console protocol handling.
//!
//! Parses the player's text input into structured values and renders the
//! engine's state and results back as text.

pub mod display;
pub mod parser;

pub use parser::{parse_command, parse_faction, parse_index, Command};
