//! Territory records and the fixed starting map tables.
//!
//! A territory has a name, exactly one owning faction and a troop count.
//! Factions are not stored separately: they are plain case-sensitive labels
//! compared by string equality.

use serde::{Deserialize, Serialize};

/// Longest territory name kept, in characters.
pub const MAX_NAME_LEN: usize = 29;

/// Longest faction label kept, in characters.
pub const MAX_FACTION_LEN: usize = 9;

/// Territory names in map order.
pub const TERRITORY_NAMES: [&str; 5] = ["Brasil", "Argentina", "Canada", "EUA", "Mexico"];

/// Starting owner of each territory, index-aligned with `TERRITORY_NAMES`.
pub const STARTING_FACTIONS: [&str; 5] = ["Vermelho", "Azul", "Verde", "Amarelo", "Preto"];

/// Truncates a label to at most `max` characters.
pub fn truncate_label(label: &str, max: usize) -> String {
    label.chars().take(max).collect()
}

/// Normalizes a faction label to the stored width.
pub fn faction_label(label: &str) -> String {
    truncate_label(label, MAX_FACTION_LEN)
}

/// A single map cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Territory {
    pub name: String,
    pub owner: String,
    pub troops: u32,
}

impl Territory {
    /// Creates a territory, truncating the name and owner to their stored widths.
    pub fn new(name: &str, owner: &str, troops: u32) -> Self {
        Territory {
            name: truncate_label(name, MAX_NAME_LEN),
            owner: faction_label(owner),
            troops,
        }
    }

    /// Returns true if `faction` owns this territory.
    pub fn is_owned_by(&self, faction: &str) -> bool {
        self.owner == faction
    }
}
