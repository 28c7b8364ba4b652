//! Player input parser.
//!
//! Turns raw console lines into menu commands, territory ids and faction
//! labels that the console loop can dispatch on.

use crate::board::faction_label;

/// A parsed main-menu choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `0`: leave the game.
    Quit,

    /// `1`: attack one territory from another.
    Attack,

    /// `2`: check whether the mission is fulfilled.
    CheckMission,

    /// Anything else, kept verbatim for the notice.
    Invalid(String),
}

/// Parses a menu line. Only the integers 0, 1 and 2 are recognized.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed.parse::<i64>() {
        Ok(0) => Command::Quit,
        Ok(1) => Command::Attack,
        Ok(2) => Command::CheckMission,
        _ => Command::Invalid(trimmed.to_string()),
    }
}

/// Parses a territory id. Negative or non-numeric input yields `None`.
pub fn parse_index(line: &str) -> Option<usize> {
    line.trim().parse::<usize>().ok()
}

/// Takes the first whitespace-delimited token as the player's faction,
/// truncated to the stored label width.
pub fn parse_faction(line: &str) -> Option<String> {
    line.split_whitespace().next().map(faction_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices() {
        assert_eq!(parse_command("0"), Command::Quit);
        assert_eq!(parse_command(" 1 \n"), Command::Attack);
        assert_eq!(parse_command("2"), Command::CheckMission);
    }

    #[test]
    fn unknown_choices_are_invalid() {
        assert_eq!(parse_command("3"), Command::Invalid("3".to_string()));
        assert_eq!(parse_command("-1"), Command::Invalid("-1".to_string()));
        assert_eq!(parse_command("attack"), Command::Invalid("attack".to_string()));
        assert_eq!(parse_command(""), Command::Invalid(String::new()));
    }

    #[test]
    fn indices() {
        assert_eq!(parse_index("4\n"), Some(4));
        assert_eq!(parse_index(" 0 "), Some(0));
        assert_eq!(parse_index("-2"), None);
        assert_eq!(parse_index("two"), None);
    }

    #[test]
    fn faction_is_first_token() {
        assert_eq!(parse_faction("  Azul escuro\n"), Some("Azul".to_string()));
        assert_eq!(parse_faction("Vermelhissimo"), Some("Vermelhis".to_string()));
        assert_eq!(parse_faction("   \n"), None);
    }
}
