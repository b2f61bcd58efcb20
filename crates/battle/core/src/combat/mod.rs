//! Combat resolution: attacks and heals against a combatant's defenses.
//!
//! Guard is a consumable pool spent against damage that gets past the flat
//! reductions; armor and magic armor are persistent flat reductions that
//! attacks never wear down (sunder excepted). Both operations validate their
//! input before writing anything and return a [`CombatLog`] of the change.
mod attack;
mod heal;
mod log;

pub use attack::apply_attack;
pub use heal::{Heal, apply_heal};
pub use log::{CombatAction, CombatLog};

use crate::error::{BattleError, ErrorKind};

/// Errors raised by combat resolution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("damage must be >= 0 (got {0})")]
    NegativeDamage(i32),

    #[error("heal {field} must be >= 0 (got {amount})")]
    NegativeHeal { field: &'static str, amount: i32 },
}

impl BattleError for CombatError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeDamage(_) => "COMBAT_NEGATIVE_DAMAGE",
            Self::NegativeHeal { .. } => "COMBAT_NEGATIVE_HEAL",
        }
    }
}
