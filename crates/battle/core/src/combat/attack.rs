//! Attack resolution.
//!
//! # Formula
//!
//! ```text
//! armor        = armor - 1                      if sunder and armor > 0
//! ignored_reg  = guard + armor                  if pierce
//!              = min(1, guard + armor)          else if stab
//! eff_guard    = guard - min(ignored_reg, guard)
//! eff_armor    = armor - (ignored_reg - (guard - eff_guard))
//! eff_magic    = 0 if magic_pierce else magic_armor
//!
//! after_fixed  = max(0, damage - (eff_armor + eff_magic))
//! guard_used   = min(eff_guard, after_fixed)
//! damage_to_hp = after_fixed - guard_used
//! ```
//!
//! Ignored reduction is bypassed, not destroyed: guard only loses what it
//! actually absorbed, and armor only loses the sundered point.

use super::{CombatAction, CombatError, CombatLog};
use crate::catalog::AttackModifiers;
use crate::state::{Combatant, StatusKind};

/// Pure mitigation outcome for one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Mitigation {
    armor_after_sunder: u32,
    ignored_regular: u32,
    ignored_magic: u32,
    guard_used: u32,
    damage_to_hp: u32,
}

impl Mitigation {
    fn resolve(combatant: &Combatant, damage: u32, modifiers: AttackModifiers) -> Self {
        let guard = combatant.guard_current;
        let magic = combatant.magic_armor_current;

        // Sunder lands first, so the destroyed point cannot mitigate this hit.
        let mut armor = combatant.armor_current;
        if modifiers.contains(AttackModifiers::SUNDER) && armor > 0 {
            armor -= 1;
        }

        let regular = guard.saturating_add(armor);
        let ignored_regular = if modifiers.contains(AttackModifiers::PIERCE) {
            regular
        } else if modifiers.contains(AttackModifiers::STAB) {
            regular.min(1)
        } else {
            0
        };
        let ignored_magic = if modifiers.contains(AttackModifiers::MAGIC_PIERCE) {
            magic
        } else {
            0
        };

        // Ignore is allocated against guard before armor.
        let ignored_from_guard = ignored_regular.min(guard);
        let effective_guard = guard - ignored_from_guard;
        let effective_armor = armor - (ignored_regular - ignored_from_guard);
        let effective_magic = magic - ignored_magic;

        let fixed = effective_armor.saturating_add(effective_magic);
        let after_fixed = damage.saturating_sub(fixed);
        let guard_used = effective_guard.min(after_fixed);

        Self {
            armor_after_sunder: armor,
            ignored_regular,
            ignored_magic,
            guard_used,
            damage_to_hp: after_fixed - guard_used,
        }
    }
}

/// Applies incoming damage to a combatant.
///
/// Zero damage is valid (a status-only attack) and still runs sunder and
/// paralyse. Negative damage fails before any field is written.
pub fn apply_attack(
    combatant: &mut Combatant,
    damage: i32,
    modifiers: AttackModifiers,
) -> Result<CombatLog, CombatError> {
    let damage = u32::try_from(damage).map_err(|_| CombatError::NegativeDamage(damage))?;

    let mut log = CombatLog::begin(combatant, CombatAction::Attack);
    let outcome = Mitigation::resolve(combatant, damage, modifiers);

    combatant.hp_current = combatant.hp_current.saturating_sub(outcome.damage_to_hp);
    combatant.guard_current = combatant.guard_current.saturating_sub(outcome.guard_used);
    combatant.armor_current = outcome.armor_after_sunder;

    if modifiers.contains(AttackModifiers::PARALYSE) {
        combatant.statuses.set_transient(StatusKind::Paralyzed);
        log.applied_statuses.push(StatusKind::Paralyzed);
    }

    log.input_damage = damage;
    log.ignored_regular = outcome.ignored_regular;
    log.ignored_magic = outcome.ignored_magic;
    log.damage_to_hp = outcome.damage_to_hp;
    log.guarded_total = damage - outcome.damage_to_hp;

    Ok(log.finish(combatant))
}
