//! Runtime state for combatants and the battle roster.
//!
//! Everything here is plain data that the persistence layer round-trips
//! losslessly. Mutation happens through the combat, draw and turn modules.
pub(crate) mod combatant;
mod deck_state;
mod ids;
mod roster;
mod status;

pub use combatant::{Combatant, RolledLoot};
pub use deck_state::DeckState;
pub use ids::{CardId, InstanceId};
pub use roster::{Roster, RosterError};
pub use status::{Status, StatusKind, Statuses};
