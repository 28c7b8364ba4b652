//! Attack resolution.
//!
//! Validates attack requests and resolves single dice rounds between two
//! territories.

pub mod combat;

pub use combat::{
    attack, attack_with_rolls, legal_attacks, resolve, validate_attack, AttackError,
    AttackOutcome, DuelRolls, RoundResult,
};
