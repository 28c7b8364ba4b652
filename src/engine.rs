//! Game session state management.
//!
//! A `Session` owns the registry, the player's faction, the secret mission
//! and the single RNG for one run. It sequences the turn state machine:
//! attacks and mission checks start from `AwaitingAction` and return to it,
//! while quitting or a fulfilled mission moves to `Terminated`.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{faction_label, MapError, Registry};
use crate::config::GameConfig;
use crate::mission::{self, Mission, MissionError};
use crate::resolve::{self, AttackError, AttackOutcome, DuelRolls};

/// Fatal errors that abort a session before or outside normal play.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("failed to build the map: {0}")]
    Map(#[from] MapError),

    #[error("failed to assign a mission: {0}")]
    Mission(#[from] MissionError),

    #[error("input closed before a faction was chosen")]
    NoFaction,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the turn loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    AwaitingAction,
    Attacking,
    CheckingVictory,
    Terminated,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ending {
    Victory,
    Quit,
}

/// Holds everything one game needs between player actions.
#[derive(Debug)]
pub struct Session {
    registry: Registry,
    player: String,
    mission: Mission,
    state: GameState,
    ending: Option<Ending>,
    rng: SmallRng,
}

impl Session {
    /// Sets up a session: seeds the RNG, builds the map, then assigns a mission.
    pub fn new(config: &GameConfig, player: &str) -> Result<Self, GameError> {
        let mut rng = if config.seed != 0 {
            SmallRng::seed_from_u64(config.seed)
        } else {
            SmallRng::from_entropy()
        };
        let player = faction_label(player);
        let registry = Registry::initialize(config.territories, config.troop_range(), &mut rng)?;
        let mission = mission::assign(&player, &mut rng)?;
        tracing::info!(
            player = %player,
            territories = registry.len(),
            mission = mission.kind_name(),
            "session started"
        );
        Ok(Session::from_parts(registry, &player, mission, rng))
    }

    /// Assembles a session from prepared parts.
    pub fn from_parts(registry: Registry, player: &str, mission: Mission, rng: SmallRng) -> Self {
        Session {
            registry,
            player: faction_label(player),
            mission,
            state: GameState::AwaitingAction,
            ending: None,
            rng,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn ending(&self) -> Option<Ending> {
        self.ending
    }

    pub fn is_active(&self) -> bool {
        self.state != GameState::Terminated
    }

    /// Attacks `target` from `origin`, rolling the session's dice.
    pub fn attack(&mut self, origin: usize, target: usize) -> Result<AttackOutcome, AttackError> {
        self.begin_attack()?;
        let result =
            resolve::attack(&mut self.registry, origin, target, &self.player, &mut self.rng);
        self.finish_attack(result)
    }

    /// Attacks with predetermined dice.
    pub fn attack_with_rolls(
        &mut self,
        origin: usize,
        target: usize,
        rolls: DuelRolls,
    ) -> Result<AttackOutcome, AttackError> {
        self.begin_attack()?;
        let result =
            resolve::attack_with_rolls(&mut self.registry, origin, target, &self.player, rolls);
        self.finish_attack(result)
    }

    fn begin_attack(&mut self) -> Result<(), AttackError> {
        if !self.is_active() {
            return Err(AttackError::SessionOver);
        }
        self.state = GameState::Attacking;
        Ok(())
    }

    fn finish_attack(
        &mut self,
        result: Result<AttackOutcome, AttackError>,
    ) -> Result<AttackOutcome, AttackError> {
        self.state = GameState::AwaitingAction;
        if let Err(e) = &result {
            tracing::debug!(error = %e, "attack rejected");
        }
        result
    }

    /// Evaluates the mission. A fulfilled mission ends the session.
    pub fn check_mission(&mut self) -> bool {
        if !self.is_active() {
            return self.ending == Some(Ending::Victory);
        }
        self.state = GameState::CheckingVictory;
        let satisfied = self.mission.is_satisfied(&self.registry, &self.player);
        if satisfied {
            tracing::info!(player = %self.player, "mission accomplished");
            self.terminate(Ending::Victory);
        } else {
            self.state = GameState::AwaitingAction;
        }
        satisfied
    }

    /// Ends the session at the player's request.
    pub fn quit(&mut self) {
        if self.is_active() {
            tracing::info!(player = %self.player, "player quit");
            self.terminate(Ending::Quit);
        }
    }

    fn terminate(&mut self, ending: Ending) {
        self.state = GameState::Terminated;
        self.ending = Some(ending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Territory;
    use crate::mission::CONQUER_GOAL;

    fn session(mission: Mission) -> Session {
        let registry = Registry::from_territories(vec![
            Territory::new("Brasil", "Vermelho", 5),
            Territory::new("Argentina", "Azul", 1),
            Territory::new("Canada", "Verde", 3),
        ]);
        Session::from_parts(registry, "Vermelho", mission, SmallRng::seed_from_u64(1))
    }

    #[test]
    fn new_session_is_awaiting_action() {
        let config = GameConfig { seed: 12, ..GameConfig::default() };
        let s = Session::new(&config, "Vermelho").unwrap();
        assert_eq!(s.state(), GameState::AwaitingAction);
        assert_eq!(s.registry().len(), 5);
        assert_eq!(s.player(), "Vermelho");
        assert!(s.ending().is_none());
    }

    #[test]
    fn same_seed_same_session() {
        let config = GameConfig { seed: 77, ..GameConfig::default() };
        let a = Session::new(&config, "Azul").unwrap();
        let b = Session::new(&config, "Azul").unwrap();
        assert_eq!(a.registry(), b.registry());
        assert_eq!(a.mission(), b.mission());
    }

    #[test]
    fn player_label_is_truncated() {
        let config = GameConfig { seed: 5, ..GameConfig::default() };
        let s = Session::new(&config, "Vermelhissimo").unwrap();
        assert_eq!(s.player(), "Vermelhis");
    }

    #[test]
    fn setup_errors_are_fatal() {
        let config = GameConfig { territories: 8, seed: 5, ..GameConfig::default() };
        assert!(matches!(
            Session::new(&config, "Azul"),
            Err(GameError::Map(MapError::NotEnoughEntries { .. }))
        ));
    }

    #[test]
    fn attack_returns_to_awaiting_action() {
        let mut s = session(Mission::ConquerCount { goal: CONQUER_GOAL });
        s.attack_with_rolls(0, 1, DuelRolls::new(6, 1)).unwrap();
        assert_eq!(s.state(), GameState::AwaitingAction);
        assert!(s.attack(1, 0).is_err());
        assert_eq!(s.state(), GameState::AwaitingAction);
    }

    #[test]
    fn unmet_mission_keeps_playing() {
        let mut s = session(Mission::ConquerCount { goal: CONQUER_GOAL });
        assert!(!s.check_mission());
        assert_eq!(s.state(), GameState::AwaitingAction);
        assert!(s.is_active());
    }

    #[test]
    fn fulfilled_mission_terminates() {
        let mut s = session(Mission::EliminateFaction { target: "Azul".to_string() });
        s.attack_with_rolls(0, 1, DuelRolls::new(6, 1)).unwrap();
        assert!(s.check_mission());
        assert_eq!(s.state(), GameState::Terminated);
        assert_eq!(s.ending(), Some(Ending::Victory));
        assert_eq!(
            s.attack_with_rolls(0, 2, DuelRolls::new(6, 1)).unwrap_err(),
            AttackError::SessionOver
        );
    }

    #[test]
    fn quit_terminates() {
        let mut s = session(Mission::ConquerCount { goal: CONQUER_GOAL });
        s.quit();
        assert_eq!(s.state(), GameState::Terminated);
        assert_eq!(s.ending(), Some(Ending::Quit));
        assert!(!s.check_mission());
    }
}
