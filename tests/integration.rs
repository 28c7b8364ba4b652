//! Integration tests for the conquest and selfplay binaries.
//!
//! Spawns the game process, feeds a script of player input via stdin, and
//! verifies what it prints to stdout.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Runs the game with `args`, sends `input` lines, and collects stdout lines.
fn run_game(args: &[&str], input: &[&str]) -> (Vec<String>, bool) {
    let exe = env!("CARGO_BIN_EXE_conquest");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start conquest");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for line in input {
        writeln!(stdin, "{}", line).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    (lines, status.success())
}

const FAST: [&str; 3] = ["--no-pause", "--seed", "42"];

#[test]
fn shows_map_mission_and_menu() {
    let (lines, ok) = run_game(&FAST, &["Vermelho", "0"]);
    assert!(ok);
    assert!(lines.iter().any(|l| l == "--- CURRENT MAP ---"));
    assert!(lines.iter().any(|l| l.starts_with("0     Brasil")));
    assert!(lines.iter().any(|l| l.starts_with("4     Mexico")));
    assert!(lines.iter().any(|l| l.starts_with("Objective: ")));
    assert!(lines.iter().any(|l| l == "0. Quit"));
    assert!(lines.iter().any(|l| l.contains("Leaving the game. See you next time!")));
}

#[test]
fn smaller_map_from_flags() {
    let (lines, ok) = run_game(
        &["--no-pause", "--seed", "3", "--territories", "2"],
        &["Azul", "0"],
    );
    assert!(ok);
    assert!(lines.iter().any(|l| l.starts_with("1     Argentina")));
    assert!(!lines.iter().any(|l| l.starts_with("2     Canada")));
}

#[test]
fn invalid_choice_then_quit() {
    let (lines, ok) = run_game(&FAST, &["Vermelho", "9", "0"]);
    assert!(ok);
    assert!(lines.iter().any(|l| l == "Invalid option '9'. Try again."));
    let maps = lines.iter().filter(|l| *l == "--- CURRENT MAP ---").count();
    assert_eq!(maps, 2, "the loop should redraw after an invalid choice");
}

#[test]
fn attack_round_is_narrated() {
    let (lines, ok) = run_game(&FAST, &["Vermelho", "1", "0", "1", "0"]);
    assert!(ok);
    assert!(lines.iter().any(|l| l.contains("Brasil (Vermelho, ")));
    assert!(lines.iter().any(|l| l.contains("Attacker rolled: ")));
    assert!(lines.iter().any(|l| l.starts_with("Result: ")));
}

#[test]
fn attacking_own_territory_is_refused() {
    let (lines, ok) = run_game(&FAST, &["Vermelho", "1", "0", "0", "0"]);
    assert!(ok);
    assert!(lines
        .iter()
        .any(|l| l.contains("Attack refused: you cannot attack your own territory (Brasil).")));
}

#[test]
fn mission_check_reports_progress() {
    let (lines, ok) = run_game(&FAST, &["Vermelho", "2", "0"]);
    assert!(ok);
    let pending = lines.iter().any(|l| l.contains("Your mission is not fulfilled yet."));
    let won = lines.iter().any(|l| l.contains("CONGRATULATIONS!"));
    assert!(pending ^ won);
}

#[test]
fn closed_input_exits_cleanly() {
    let (_, ok) = run_game(&FAST, &["Verde"]);
    assert!(ok);
}

#[test]
fn no_faction_is_an_error() {
    let (_, ok) = run_game(&FAST, &[]);
    assert!(!ok);
}

#[test]
fn unknown_flag_is_an_error() {
    let (lines, ok) = run_game(&["--bogus"], &[]);
    assert!(!ok);
    assert!(lines.is_empty());
}

#[test]
fn selfplay_honors_troop_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_selfplay"))
        .args(["--games", "2", "--max-turns", "0", "--threads", "1", "--seed", "5"])
        .args(["--min-troops", "4", "--max-troops", "4", "--quiet"])
        .stderr(Stdio::null())
        .output()
        .expect("failed to run selfplay");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(text.lines().count(), 2);
    for line in text.lines() {
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        let map = record["final_map"]["territories"].as_array().unwrap();
        assert_eq!(map.len(), 5);
        assert!(map.iter().all(|t| t["troops"] == 4));
    }
}
