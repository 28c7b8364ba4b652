//! Secret missions.
//!
//! Each session assigns the player one mission at setup. A mission is either
//! wiping a rival faction off the map or holding a fixed number of
//! territories. Evaluation is a pure read of the registry.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Registry;

/// Factions an eliminate mission may target.
pub const TARGET_POOL: [&str; 5] = ["Azul", "Verde", "Amarelo", "Preto", "Branco"];

/// Territories the player must hold to fulfil a conquer mission.
pub const CONQUER_GOAL: usize = 3;

/// Number of mission kinds drawn from at assignment.
const MISSION_KINDS: u32 = 2;

/// Errors raised while assigning a mission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissionError {
    #[error("no faction other than '{player}' is available as a target")]
    NoEligibleTarget { player: String },
}

/// The player's private win condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mission {
    /// Remove every territory owned by `target` from the map.
    EliminateFaction { target: String },
    /// Own at least `goal` territories.
    ConquerCount { goal: usize },
}

impl Mission {
    /// Human-readable objective shown to the player.
    pub fn description(&self) -> String {
        match self {
            Mission::EliminateFaction { target } => {
                format!("Completely destroy the {} army.", target)
            }
            Mission::ConquerCount { goal } => format!("Conquer {} territories.", goal),
        }
    }

    /// Short kind name used in records and summaries.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Mission::EliminateFaction { .. } => "eliminate_faction",
            Mission::ConquerCount { .. } => "conquer_count",
        }
    }

    /// Returns true if the mission is fulfilled on the current map.
    pub fn is_satisfied(&self, registry: &Registry, player: &str) -> bool {
        is_satisfied(self, registry, player)
    }
}

/// Draws a mission for `player` using the standard target pool.
pub fn assign(player: &str, rng: &mut impl Rng) -> Result<Mission, MissionError> {
    assign_from_pool(player, &TARGET_POOL, rng)
}

/// Draws a mission kind uniformly, then (for eliminate missions) a target
/// uniformly among the pool entries that differ from `player`.
pub fn assign_from_pool(
    player: &str,
    pool: &[&str],
    rng: &mut impl Rng,
) -> Result<Mission, MissionError> {
    let mission = match rng.gen_range(0..MISSION_KINDS) {
        0 => {
            let candidates: Vec<&str> = pool.iter().copied().filter(|f| *f != player).collect();
            let target = candidates
                .choose(rng)
                .ok_or_else(|| MissionError::NoEligibleTarget { player: player.to_string() })?;
            Mission::EliminateFaction { target: target.to_string() }
        }
        _ => Mission::ConquerCount { goal: CONQUER_GOAL },
    };
    tracing::debug!(kind = mission.kind_name(), player, "mission assigned");
    Ok(mission)
}

/// Evaluates `mission` against the registry without mutating anything.
pub fn is_satisfied(mission: &Mission, registry: &Registry, player: &str) -> bool {
    match mission {
        Mission::EliminateFaction { target } => !registry.has_faction(target),
        Mission::ConquerCount { goal } => registry.count_owned_by(player) >= *goal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Territory;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn map(owners: &[&str]) -> Registry {
        Registry::from_territories(
            owners
                .iter()
                .enumerate()
                .map(|(i, o)| Territory::new(&format!("T{}", i), o, 3))
                .collect(),
        )
    }

    #[test]
    fn eliminate_target_never_equals_player() {
        let mut rng = SmallRng::seed_from_u64(42);
        for player in TARGET_POOL {
            for _ in 0..200 {
                if let Mission::EliminateFaction { target } = assign(player, &mut rng).unwrap() {
                    assert_ne!(target, player);
                    assert!(TARGET_POOL.contains(&target.as_str()));
                }
            }
        }
    }

    #[test]
    fn both_kinds_are_drawn() {
        let mut rng = SmallRng::seed_from_u64(3);
        let missions: Vec<Mission> =
            (0..100).map(|_| assign("Vermelho", &mut rng).unwrap()).collect();
        assert!(missions.iter().any(|m| matches!(m, Mission::EliminateFaction { .. })));
        assert!(missions.contains(&Mission::ConquerCount { goal: CONQUER_GOAL }));
    }

    #[test]
    fn pool_of_only_the_player_fails_instead_of_looping() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut saw_error = false;
        for _ in 0..50 {
            match assign_from_pool("Azul", &["Azul"], &mut rng) {
                Ok(mission) => assert_eq!(mission, Mission::ConquerCount { goal: CONQUER_GOAL }),
                Err(e) => {
                    assert_eq!(e, MissionError::NoEligibleTarget { player: "Azul".to_string() });
                    saw_error = true;
                }
            }
        }
        assert!(saw_error);
    }

    #[test]
    fn eliminate_satisfied_iff_target_absent() {
        let mission = Mission::EliminateFaction { target: "Azul".to_string() };
        assert!(!is_satisfied(&mission, &map(&["Vermelho", "Azul", "Verde"]), "Vermelho"));
        assert!(is_satisfied(&mission, &map(&["Vermelho", "Vermelho", "Verde"]), "Vermelho"));
        // Case-sensitive: "azul" is a different faction.
        assert!(is_satisfied(&mission, &map(&["Vermelho", "azul"]), "Vermelho"));
    }

    #[test]
    fn conquer_satisfied_at_threshold() {
        let mission = Mission::ConquerCount { goal: CONQUER_GOAL };
        assert!(!is_satisfied(&mission, &map(&["Vermelho", "Vermelho", "Azul"]), "Vermelho"));
        assert!(is_satisfied(
            &mission,
            &map(&["Vermelho", "Vermelho", "Vermelho", "Azul"]),
            "Vermelho"
        ));
        assert!(mission.is_satisfied(&map(&["Azul"; 4]), "Azul"));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let registry = map(&["Vermelho", "Azul", "Verde", "Amarelo", "Preto"]);
        let mission = Mission::EliminateFaction { target: "Branco".to_string() };
        let first = is_satisfied(&mission, &registry, "Vermelho");
        let second = is_satisfied(&mission, &registry, "Vermelho");
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn descriptions_embed_parameters() {
        let eliminate = Mission::EliminateFaction { target: "Preto".to_string() };
        assert_eq!(eliminate.description(), "Completely destroy the Preto army.");
        assert_eq!(
            Mission::ConquerCount { goal: 3 }.description(),
            "Conquer 3 territories."
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&Mission::EliminateFaction { target: "Verde".into() })
            .unwrap();
        assert_eq!(json, r#"{"kind":"eliminate_faction","target":"Verde"}"#);
    }
}
