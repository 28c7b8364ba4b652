//! Batch autoplay.
//!
//! Plays many independent sessions with a random legal-attack policy for the
//! player and records how each one ended. Used to gauge how reachable each
//! mission kind is on the starting map.

use std::collections::BTreeMap;
use std::io::Write;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::{Registry, STARTING_FACTIONS};
use crate::config::GameConfig;
use crate::engine::{GameError, Session};
use crate::mission::Mission;
use crate::resolve::{legal_attacks, RoundResult};

/// Errors that stop a batch.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a batch of autoplayed games.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Actions allowed per game before it is cut off.
    pub max_turns: u32,
    /// Territories on the map.
    pub territories: usize,
    /// Smallest starting garrison.
    pub min_troops: u32,
    /// Largest starting garrison.
    pub max_troops: u32,
    /// Faction to play; a random starting faction when unset.
    pub player: Option<String>,
    /// Number of parallel threads.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            max_turns: 200,
            territories: 5,
            min_troops: 3,
            max_troops: 7,
            player: None,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    /// Session settings for one game of the batch.
    pub fn game_config(&self, seed: u64) -> GameConfig {
        GameConfig {
            territories: self.territories,
            min_troops: self.min_troops,
            max_troops: self.max_troops,
            seed,
            pause: false,
        }
    }
}

/// How an autoplayed game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// The mission was fulfilled.
    Won,
    /// No legal attack was left.
    Stalled,
    /// The turn cap was reached.
    TurnLimit,
}

/// A complete autoplayed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    /// Seed that reproduces this game.
    pub seed: u64,
    pub player: String,
    pub mission: Mission,
    pub outcome: GameOutcome,
    pub turns: u32,
    pub attacks: u32,
    pub conquests: u32,
    pub final_map: Registry,
}

/// Seed for one game of the batch; never 0 so the session does not reseed.
fn game_seed(config: &SelfPlayConfig, game_id: usize) -> u64 {
    if config.seed != 0 {
        config.seed.wrapping_add(game_id as u64).max(1)
    } else {
        SmallRng::from_entropy().gen::<u64>().max(1)
    }
}

/// Plays a single game and returns its record.
pub fn play_game(config: &SelfPlayConfig, game_id: usize) -> Result<GameRecord, GameError> {
    let seed = game_seed(config, game_id);
    let mut policy = SmallRng::seed_from_u64(seed.rotate_left(17));

    let player = match &config.player {
        Some(p) => p.clone(),
        None => {
            let pool = &STARTING_FACTIONS[..config.territories.clamp(1, STARTING_FACTIONS.len())];
            pool.choose(&mut policy).copied().unwrap_or(STARTING_FACTIONS[0]).to_string()
        }
    };

    let mut session = Session::new(&config.game_config(seed), &player)?;

    let mut turns = 0;
    let mut attacks = 0;
    let mut conquests = 0;
    let mut outcome = GameOutcome::TurnLimit;

    while turns < config.max_turns {
        turns += 1;
        if session.check_mission() {
            outcome = GameOutcome::Won;
            break;
        }

        let moves = legal_attacks(session.registry(), session.player());
        let Some(&(origin, target)) = moves.choose(&mut policy) else {
            outcome = GameOutcome::Stalled;
            break;
        };

        match session.attack(origin, target) {
            Ok(result) => {
                attacks += 1;
                if result.result == RoundResult::Conquered {
                    conquests += 1;
                }
            }
            Err(e) => {
                tracing::warn!(game_id, error = %e, "autoplay picked an illegal attack");
                outcome = GameOutcome::Stalled;
                break;
            }
        }
    }

    if outcome == GameOutcome::TurnLimit {
        if session.check_mission() {
            outcome = GameOutcome::Won;
        } else {
            session.quit();
        }
    }

    Ok(GameRecord {
        game_id,
        seed,
        player: session.player().to_string(),
        mission: session.mission().clone(),
        outcome,
        turns,
        attacks,
        conquests,
        final_map: session.registry().clone(),
    })
}

/// Plays the whole batch, in game-id order.
///
/// When `config.threads > 1`, games run concurrently on a rayon pool.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    if config.threads > 1 {
        use rayon::prelude::*;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        let games = pool.install(|| {
            (0..config.num_games)
                .into_par_iter()
                .map(|i| play_and_report(config, i))
                .collect::<Result<Vec<_>, _>>()
        })?;
        Ok(games)
    } else {
        let games = (0..config.num_games)
            .map(|i| play_and_report(config, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(games)
    }
}

fn play_and_report(config: &SelfPlayConfig, game_id: usize) -> Result<GameRecord, GameError> {
    let game = play_game(config, game_id)?;
    if !config.quiet {
        tracing::info!(
            game = game_id + 1,
            of = config.num_games,
            outcome = ?game.outcome,
            mission = game.mission.kind_name(),
            turns = game.turns,
            "game finished"
        );
    }
    Ok(game)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate results for a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub won: usize,
    pub stalled: usize,
    pub turn_limit: usize,
    pub mean_turns: f64,
    /// Games and wins per mission kind.
    pub by_mission: BTreeMap<&'static str, (usize, usize)>,
}

/// Tallies outcomes across a batch.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary { games: games.len(), ..Summary::default() };
    let mut total_turns = 0u64;

    for game in games {
        total_turns += u64::from(game.turns);
        let entry = summary.by_mission.entry(game.mission.kind_name()).or_default();
        entry.0 += 1;
        match game.outcome {
            GameOutcome::Won => {
                summary.won += 1;
                entry.1 += 1;
            }
            GameOutcome::Stalled => summary.stalled += 1,
            GameOutcome::TurnLimit => summary.turn_limit += 1,
        }
    }
    if !games.is_empty() {
        summary.mean_turns = total_turns as f64 / games.len() as f64;
    }
    summary
}

/// Prints a human-readable summary.
pub fn write_summary<W: Write>(summary: &Summary, out: &mut W) -> std::io::Result<()> {
    writeln!(
        out,
        "Games: {}  won: {}  stalled: {}  turn limit: {}  mean turns: {:.1}",
        summary.games, summary.won, summary.stalled, summary.turn_limit, summary.mean_turns
    )?;
    for (kind, (games, wins)) in &summary.by_mission {
        let rate = if *games > 0 { *wins as f64 / *games as f64 * 100.0 } else { 0.0 };
        writeln!(out, "  {:<18} {:>5} games  {:>5.1}% won", kind, games, rate)?;
    }
    Ok(())
}
