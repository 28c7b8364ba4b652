//! Board representation.
//!
//! Contains the territory record, the fixed starting tables, and the
//! registry that owns every territory for the length of a session.

pub mod registry;
pub mod territory;

pub use registry::{MapError, Registry};
pub use territory::{
    faction_label, truncate_label, Territory, MAX_FACTION_LEN, MAX_NAME_LEN, STARTING_FACTIONS,
    TERRITORY_NAMES,
};
