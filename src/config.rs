//! Session configuration.
//!
//! Holds the map size, starting troop range, RNG seed and console pacing.
//! Values come from defaults or from command-line flags.

use std::ops::RangeInclusive;

/// Errors raised while reading command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },
}

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of territories taken from the fixed map tables.
    pub territories: usize,
    /// Smallest starting garrison.
    pub min_troops: u32,
    /// Largest starting garrison.
    pub max_troops: u32,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Wait for ENTER after each action.
    pub pause: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            territories: 5,
            min_troops: 3,
            max_troops: 7,
            seed: 0,
            pause: true,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliRequest {
    Play(GameConfig),
    Help,
}

impl GameConfig {
    /// Inclusive range starting troop counts are drawn from.
    pub fn troop_range(&self) -> RangeInclusive<u32> {
        self.min_troops..=self.max_troops
    }

    /// Parses `--flag value` style arguments (program name excluded).
    pub fn from_args<I>(args: I) -> Result<CliRequest, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut config = GameConfig::default();
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--territories" => config.territories = parse_value(&arg, args.next())?,
                "--min-troops" => config.min_troops = parse_value(&arg, args.next())?,
                "--max-troops" => config.max_troops = parse_value(&arg, args.next())?,
                "--seed" => config.seed = parse_value(&arg, args.next())?,
                "--no-pause" => config.pause = false,
                "--help" | "-h" => return Ok(CliRequest::Help),
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        Ok(CliRequest::Play(config))
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}

/// Usage text for the game binary.
pub const USAGE: &str = "\
Usage: conquest [OPTIONS]

Options:
  --territories N   Territories on the map, 1-5 (default: 5)
  --min-troops N    Smallest starting garrison (default: 3)
  --max-troops N    Largest starting garrison (default: 7)
  --seed N          Random seed, 0 for entropy (default: 0)
  --no-pause        Do not wait for ENTER between actions
  --help            Show this help";
