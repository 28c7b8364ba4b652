//! Attack validation and single-round dice resolution.
//!
//! An attack is one d6 duel between two territories. The attacker must
//! strictly beat the defender's roll; ties go to the defender. Only the two
//! territories involved are ever mutated.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{MapError, Registry, Territory};

/// Faces on each die.
pub const DIE_FACES: u8 = 6;

/// Minimum troops a territory must keep behind; attacking needs more than this.
pub const MIN_GARRISON: u32 = 1;

/// Reasons an attack request is refused. The registry is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    #[error(
        "invalid territory id {index} (valid ids are 0 to {max})",
        max = .count.saturating_sub(1)
    )]
    InvalidIndex { index: usize, count: usize },

    #[error("invalid territory id '{0}'")]
    UnreadableIndex(String),

    #[error("you can only attack from your own territories ({territory} belongs to {owner})")]
    NotOwner { territory: String, owner: String },

    #[error("you cannot attack your own territory ({territory})")]
    SelfAttack { territory: String },

    #[error("{territory} needs more than 1 troop to attack (it has {troops})")]
    InsufficientTroops { territory: String, troops: u32 },

    #[error("the game is already over")]
    SessionOver,

    #[error("territory {0} cannot attack itself")]
    SameTerritory(usize),

    #[error("map error: {0}")]
    Map(MapError),
}

impl From<MapError> for AttackError {
    fn from(e: MapError) -> Self {
        match e {
            MapError::OutOfRange { index, count } => AttackError::InvalidIndex { index, count },
            MapError::SameTerritory(index) => AttackError::SameTerritory(index),
            other => AttackError::Map(other),
        }
    }
}

/// The two dice thrown in one attack round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DuelRolls {
    pub attacker: u8,
    pub defender: u8,
}

impl DuelRolls {
    pub fn new(attacker: u8, defender: u8) -> Self {
        DuelRolls { attacker, defender }
    }

    /// Throws two independent d6.
    pub fn roll(rng: &mut impl Rng) -> Self {
        DuelRolls {
            attacker: rng.gen_range(1..=DIE_FACES),
            defender: rng.gen_range(1..=DIE_FACES),
        }
    }

    /// Strictly greater wins; ties favor the defender.
    pub const fn attacker_wins(self) -> bool {
        self.attacker > self.defender
    }
}

/// What one round did to the two territories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundResult {
    /// Defender lost one troop and still holds.
    DefenderLost,
    /// Defender was wiped out and changed hands; one troop moved in.
    Conquered,
    /// Attack failed; attacker lost one troop.
    AttackerLost,
}

/// Full narrative of a resolved attack, used by the display layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub rolls: DuelRolls,
    pub result: RoundResult,
    pub attacker_before: Territory,
    pub defender_before: Territory,
    pub attacker_after: Territory,
    pub defender_after: Territory,
}

/// Checks that `player` may attack `target` from `origin`.
pub fn validate_attack(
    registry: &Registry,
    origin: usize,
    target: usize,
    player: &str,
) -> Result<(), AttackError> {
    let attacker = registry.get(origin)?;
    let defender = registry.get(target)?;

    if !attacker.is_owned_by(player) {
        return Err(AttackError::NotOwner {
            territory: attacker.name.clone(),
            owner: attacker.owner.clone(),
        });
    }
    if defender.is_owned_by(player) {
        return Err(AttackError::SelfAttack { territory: defender.name.clone() });
    }
    if attacker.troops <= MIN_GARRISON {
        return Err(AttackError::InsufficientTroops {
            territory: attacker.name.clone(),
            troops: attacker.troops,
        });
    }
    Ok(())
}

/// Applies one duel to the two territories.
///
/// On a win the defender loses a troop; if that empties it, ownership passes
/// to the attacker's faction and exactly one troop moves over from the
/// attacker. On a loss or tie the attacker loses a troop.
pub fn resolve(
    attacker: &mut Territory,
    defender: &mut Territory,
    rolls: DuelRolls,
) -> RoundResult {
    if !rolls.attacker_wins() {
        attacker.troops = attacker.troops.saturating_sub(1);
        return RoundResult::AttackerLost;
    }

    defender.troops = defender.troops.saturating_sub(1);
    if defender.troops > 0 {
        return RoundResult::DefenderLost;
    }

    defender.owner.clone_from(&attacker.owner);
    defender.troops = 1;
    attacker.troops = attacker.troops.saturating_sub(1);
    RoundResult::Conquered
}

/// Validates and resolves an attack, throwing the dice only once the
/// request is known to be legal.
pub fn attack(
    registry: &mut Registry,
    origin: usize,
    target: usize,
    player: &str,
    rng: &mut impl Rng,
) -> Result<AttackOutcome, AttackError> {
    validate_attack(registry, origin, target, player)?;
    let rolls = DuelRolls::roll(rng);
    strike(registry, origin, target, rolls)
}

/// Validates and resolves an attack with predetermined dice.
pub fn attack_with_rolls(
    registry: &mut Registry,
    origin: usize,
    target: usize,
    player: &str,
    rolls: DuelRolls,
) -> Result<AttackOutcome, AttackError> {
    validate_attack(registry, origin, target, player)?;
    strike(registry, origin, target, rolls)
}

fn strike(
    registry: &mut Registry,
    origin: usize,
    target: usize,
    rolls: DuelRolls,
) -> Result<AttackOutcome, AttackError> {
    let (attacker, defender) = registry.pair_mut(origin, target)?;
    let attacker_before = attacker.clone();
    let defender_before = defender.clone();

    let result = resolve(attacker, defender, rolls);
    tracing::debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        attacker_roll = rolls.attacker,
        defender_roll = rolls.defender,
        ?result,
        "attack resolved"
    );
    if result == RoundResult::Conquered {
        tracing::info!(territory = %defender.name, owner = %defender.owner, "territory conquered");
    }

    Ok(AttackOutcome {
        rolls,
        result,
        attacker_before,
        defender_before,
        attacker_after: attacker.clone(),
        defender_after: defender.clone(),
    })
}

/// Every (origin, target) pair `player` may currently attack.
pub fn legal_attacks(registry: &Registry, player: &str) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (origin, attacker) in registry.iter().enumerate() {
        if !attacker.is_owned_by(player) || attacker.troops <= MIN_GARRISON {
            continue;
        }
        for (target, defender) in registry.iter().enumerate() {
            if !defender.is_owned_by(player) {
                pairs.push((origin, target));
            }
        }
    }
    pairs
}
