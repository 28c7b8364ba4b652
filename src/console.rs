//! Interactive console loop.
//!
//! Reads the player's faction and per-turn choices from any `BufRead`,
//! drives a `Session`, and renders everything through `protocol::display`.
//! Recoverable problems are shown to the player and the turn continues.

use std::io::{BufRead, Write};

use crate::config::GameConfig;
use crate::engine::{GameError, Session};
use crate::protocol::display;
use crate::protocol::{parse_command, parse_faction, parse_index, Command};
use crate::resolve::AttackError;

/// Line source that treats read errors and end of input alike.
struct Input<R> {
    reader: R,
    buf: String,
}

impl<R: BufRead> Input<R> {
    fn new(reader: R) -> Self {
        Input { reader, buf: String::new() }
    }

    /// Next line, or `None` once input is exhausted.
    fn next_line(&mut self) -> Result<Option<&str>, GameError> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.buf.as_str()))
    }
}

/// Plays one full game and returns the finished session.
pub fn run<R: BufRead, W: Write>(
    config: &GameConfig,
    reader: R,
    out: &mut W,
) -> Result<Session, GameError> {
    let mut input = Input::new(reader);

    let faction = loop {
        display::write_prompt(out, "Choose your army color (e.g. Vermelho, Azul, Verde): ")?;
        match input.next_line()? {
            Some(line) => {
                if let Some(faction) = parse_faction(line) {
                    break faction;
                }
            }
            None => return Err(GameError::NoFaction),
        }
    };

    let mut session = Session::new(config, &faction)?;

    while session.is_active() {
        display::write_map(out, session.registry())?;
        display::write_mission(out, session.mission())?;
        display::write_menu(out)?;
        display::write_prompt(out, "Choose your action: ")?;

        let command = match input.next_line()? {
            Some(line) => parse_command(line),
            None => Command::Quit,
        };

        match command {
            Command::Attack => attack_phase(&mut session, &mut input, out)?,
            Command::CheckMission => {
                if session.check_mission() {
                    display::write_victory(out)?;
                } else {
                    display::write_mission_pending(out)?;
                }
            }
            Command::Quit => {
                display::write_farewell(out)?;
                session.quit();
            }
            Command::Invalid(choice) => display::write_invalid_choice(out, &choice)?,
        }

        if config.pause {
            writeln!(out)?;
            display::write_prompt(out, "Press ENTER to continue...")?;
            if input.next_line()?.is_none() {
                session.quit();
            }
        }
    }

    out.flush()?;
    Ok(session)
}

/// Reads origin and target ids, then attacks or reports why it cannot.
fn attack_phase<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut Input<R>,
    out: &mut W,
) -> Result<(), GameError> {
    writeln!(out)?;
    writeln!(out, "--- ATTACK PHASE ---")?;
    display::write_prompt(out, "Enter the id of the origin territory (yours): ")?;
    let origin = read_index(input)?;
    display::write_prompt(out, "Enter the id of the target territory (enemy): ")?;
    let target = read_index(input)?;

    let result = match (origin, target) {
        (Ok(origin), Ok(target)) => session.attack(origin, target),
        (Err(e), _) | (_, Err(e)) => Err(e),
    };

    match result {
        Ok(outcome) => display::write_outcome(out, &outcome)?,
        Err(e) => display::write_rejection(out, &e)?,
    }
    Ok(())
}

fn read_index<R: BufRead>(input: &mut Input<R>) -> Result<Result<usize, AttackError>, GameError> {
    let line = input.next_line()?.unwrap_or_default();
    Ok(parse_index(line).ok_or_else(|| AttackError::UnreadableIndex(line.trim().to_string())))
}
