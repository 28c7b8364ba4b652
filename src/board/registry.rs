//! The fixed collection of territories for one session.
//!
//! The registry is built once at setup and never grows or shrinks. Lookups
//! are bounds-checked by index; combat mutates records in place through
//! `pair_mut`.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::territory::{Territory, STARTING_FACTIONS, TERRITORY_NAMES};

/// Errors raised while building or indexing the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("a map needs at least one territory")]
    Empty,

    #[error("requested {requested} territories but only {available} are defined")]
    NotEnoughEntries { requested: usize, available: usize },

    #[error("territory {index} is out of range (map has {count})")]
    OutOfRange { index: usize, count: usize },

    #[error("invalid troop range {min}..={max}")]
    InvalidTroopRange { min: u32, max: u32 },

    #[error("territory {0} cannot be paired with itself")]
    SameTerritory(usize),
}

/// Owned, fixed-length territory collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    territories: Vec<Territory>,
}

impl Registry {
    /// Builds `count` territories from the fixed name and faction tables,
    /// each with a troop count drawn uniformly from `troops`.
    pub fn initialize(
        count: usize,
        troops: RangeInclusive<u32>,
        rng: &mut impl Rng,
    ) -> Result<Self, MapError> {
        if count == 0 {
            return Err(MapError::Empty);
        }
        let available = TERRITORY_NAMES.len().min(STARTING_FACTIONS.len());
        if count > available {
            return Err(MapError::NotEnoughEntries { requested: count, available });
        }
        if troops.is_empty() {
            return Err(MapError::InvalidTroopRange {
                min: *troops.start(),
                max: *troops.end(),
            });
        }

        let territories = TERRITORY_NAMES
            .iter()
            .zip(STARTING_FACTIONS.iter())
            .take(count)
            .map(|(name, owner)| Territory::new(name, owner, rng.gen_range(troops.clone())))
            .collect();

        Ok(Registry { territories })
    }

    /// Wraps an explicit set of territories.
    pub fn from_territories(territories: Vec<Territory>) -> Self {
        Registry { territories }
    }

    /// Number of territories on the map.
    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    /// Returns the territory at a 0-based index.
    pub fn get(&self, index: usize) -> Result<&Territory, MapError> {
        self.territories.get(index).ok_or(MapError::OutOfRange {
            index,
            count: self.territories.len(),
        })
    }

    /// Returns the territory at a 0-based index for mutation.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Territory, MapError> {
        let count = self.territories.len();
        self.territories
            .get_mut(index)
            .ok_or(MapError::OutOfRange { index, count })
    }

    /// Borrows two distinct territories mutably at once.
    pub fn pair_mut(
        &mut self,
        first: usize,
        second: usize,
    ) -> Result<(&mut Territory, &mut Territory), MapError> {
        let count = self.territories.len();
        for index in [first, second] {
            if index >= count {
                return Err(MapError::OutOfRange { index, count });
            }
        }
        if first == second {
            return Err(MapError::SameTerritory(first));
        }

        if first < second {
            let (head, tail) = self.territories.split_at_mut(second);
            Ok((&mut head[first], &mut tail[0]))
        } else {
            let (head, tail) = self.territories.split_at_mut(first);
            Ok((&mut tail[0], &mut head[second]))
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Territory> {
        self.territories.iter()
    }

    /// Counts the territories owned by `faction`.
    pub fn count_owned_by(&self, faction: &str) -> usize {
        self.territories.iter().filter(|t| t.is_owned_by(faction)).count()
    }

    /// Returns true if `faction` still holds at least one territory.
    pub fn has_faction(&self, faction: &str) -> bool {
        self.territories.iter().any(|t| t.is_owned_by(faction))
    }

    /// Distinct owners in map order.
    pub fn factions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for t in &self.territories {
            if !seen.contains(&t.owner.as_str()) {
                seen.push(&t.owner);
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Territory;
    type IntoIter = std::slice::Iter<'a, Territory>;

    fn into_iter(self) -> Self::IntoIter {
        self.territories.iter()
    }
}
