//! Text rendering for the console.
//!
//! Every player-facing line the game prints is written here, so the
//! console loop only decides what to show and when.

use std::io::{self, Write};

use crate::board::{Registry, Territory};
use crate::mission::Mission;
use crate::resolve::{AttackError, AttackOutcome, RoundResult};

const RULE: &str = "-------------------------------------------------";

/// Renders the map as an id/name/owner/troops table.
pub fn write_map<W: Write>(out: &mut W, registry: &Registry) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- CURRENT MAP ---")?;
    writeln!(out, "{:<5} {:<20} {:<10} {:<7}", "ID", "Territory", "Owner", "Troops")?;
    writeln!(out, "{}", RULE)?;
    for (i, t) in registry.iter().enumerate() {
        writeln!(out, "{:<5} {:<20} {:<10} {:<7}", i, t.name, t.owner, t.troops)?;
    }
    writeln!(out, "{}", RULE)
}

/// Renders the mission panel.
pub fn write_mission<W: Write>(out: &mut W, mission: &Mission) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- YOUR MISSION ---")?;
    writeln!(out, "Objective: {}", mission.description())?;
    writeln!(out, "--------------------")
}

/// Renders the three fixed menu options.
pub fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- MAIN MENU ---")?;
    writeln!(out, "1. Attack")?;
    writeln!(out, "2. Check mission")?;
    writeln!(out, "0. Quit")?;
    writeln!(out, "-----------------")
}

/// Writes a prompt without a trailing newline and flushes it.
pub fn write_prompt<W: Write>(out: &mut W, prompt: &str) -> io::Result<()> {
    write!(out, "{}", prompt)?;
    out.flush()
}

fn describe(t: &Territory) -> String {
    format!("{} ({}, {} troops)", t.name, t.owner, t.troops)
}

/// Renders the dice and the resulting change of one attack round.
pub fn write_outcome<W: Write>(out: &mut W, outcome: &AttackOutcome) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- ATTACK ---")?;
    writeln!(
        out,
        "{} attacks {}!",
        describe(&outcome.attacker_before),
        describe(&outcome.defender_before)
    )?;
    writeln!(out, "Attacker rolled: {}", outcome.rolls.attacker)?;
    writeln!(out, "Defender rolled: {}", outcome.rolls.defender)?;
    match outcome.result {
        RoundResult::DefenderLost => {
            writeln!(out, "Attack succeeded! The defender loses one troop.")?;
        }
        RoundResult::Conquered => {
            writeln!(out, "Attack succeeded! The defender loses one troop.")?;
            writeln!(
                out,
                "{} conquered {}!",
                outcome.attacker_after.name, outcome.defender_after.name
            )?;
        }
        RoundResult::AttackerLost => {
            writeln!(out, "Attack failed! The attacker loses one troop.")?;
        }
    }
    writeln!(
        out,
        "Result: {} vs {}",
        describe(&outcome.attacker_after),
        describe(&outcome.defender_after)
    )
}

/// Renders the reason an attack was refused.
pub fn write_rejection<W: Write>(out: &mut W, error: &AttackError) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Attack refused: {}.", error)
}

pub fn write_invalid_choice<W: Write>(out: &mut W, choice: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Invalid option '{}'. Try again.", choice)
}

pub fn write_victory<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "CONGRATULATIONS! You fulfilled your mission and won the game!")
}

pub fn write_mission_pending<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Your mission is not fulfilled yet. Keep fighting!")
}

pub fn write_farewell<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Leaving the game. See you next time!")
}
