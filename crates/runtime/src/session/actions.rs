//! Combat and loot commands against a single combatant.

use battle_core::{
    AttackModifiers, CombatLog, Combatant, Heal, RolledLoot, StatusKind, apply_attack, apply_heal,
};

use super::BattleSession;
use crate::api::{Result, RuntimeError};

/// An attack plus the status toggles a driver can attach to it.
///
/// Paralysis rides on [`AttackModifiers::PARALYSE`]; the remaining statuses
/// are applied after damage resolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackRequest {
    pub damage: i32,
    pub modifiers: AttackModifiers,
    /// Adds one burn stack.
    pub burn: bool,
    /// Adds one poison stack.
    pub poison: bool,
    pub slow: bool,
}

impl AttackRequest {
    pub fn new(damage: i32) -> Self {
        Self {
            damage,
            ..Self::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: AttackModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl BattleSession {
    fn stat_target(&mut self, id: &str) -> Result<&mut Combatant> {
        let combatant = self.roster.require_mut(id)?;
        if combatant.is_player() {
            return Err(RuntimeError::PlayerHasNoStats(combatant.instance_id.clone()));
        }
        Ok(combatant)
    }

    /// Resolves an attack, then applies the requested statuses.
    pub fn apply_attack(&mut self, id: &str, request: AttackRequest) -> Result<CombatLog> {
        let combatant = self.stat_target(id)?;
        let mut log = apply_attack(combatant, request.damage, request.modifiers)?;

        if request.burn {
            combatant.statuses.add_stacks(StatusKind::Burn, 1);
            log.applied_statuses.push(StatusKind::Burn);
        }
        if request.poison {
            combatant.statuses.add_stacks(StatusKind::Poison, 1);
            log.applied_statuses.push(StatusKind::Poison);
        }
        if request.slow {
            combatant.statuses.set_transient(StatusKind::Slowed);
            log.applied_statuses.push(StatusKind::Slowed);
        }

        tracing::debug!(
            "{} hit for {}: hp {} -> {}, guard {} -> {}, statuses {}",
            combatant.name,
            log.input_damage,
            log.hp_before,
            log.hp_after,
            log.guard_before,
            log.guard_after,
            combatant.statuses
        );
        Ok(log)
    }

    pub fn apply_heal(&mut self, id: &str, heal: Heal) -> Result<CombatLog> {
        let combatant = self.stat_target(id)?;
        let log = apply_heal(combatant, heal)?;
        tracing::debug!(
            "{} healed: hp {} -> {}, guard {} -> {}",
            combatant.name,
            log.hp_before,
            log.hp_after,
            log.guard_before,
            log.guard_after
        );
        Ok(log)
    }

    /// Stores an externally rolled loot result on a template enemy.
    pub fn set_loot(&mut self, id: &str, loot: RolledLoot) -> Result<()> {
        let combatant = self.stat_target(id)?;
        if combatant.is_custom() {
            return Err(RuntimeError::CustomHasNoLoot(combatant.instance_id.clone()));
        }
        combatant.set_rolled_loot(loot);
        tracing::info!("Stored loot for {}", combatant.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{CustomEnemy, ErrorKind};

    use super::super::fixtures::session;
    use super::*;

    #[test]
    fn attack_applies_status_toggles() {
        let mut session = session();
        let id = session.add_enemy("sentry").unwrap();

        let request = AttackRequest {
            burn: true,
            poison: true,
            slow: true,
            ..AttackRequest::new(0).with_modifiers(AttackModifiers::PARALYSE)
        };
        let log = session.apply_attack(id.as_str(), request).unwrap();
        session.apply_attack(id.as_str(), request).unwrap();

        let enemy = session.get(id.as_str()).unwrap();
        assert_eq!(enemy.statuses.stacks(StatusKind::Burn), 2);
        assert_eq!(enemy.statuses.stacks(StatusKind::Poison), 2);
        assert_eq!(enemy.statuses.stacks(StatusKind::Slowed), 1);
        assert_eq!(enemy.statuses.stacks(StatusKind::Paralyzed), 1);
        assert_eq!(
            log.applied_statuses,
            vec![
                StatusKind::Paralyzed,
                StatusKind::Burn,
                StatusKind::Poison,
                StatusKind::Slowed
            ]
        );
    }

    #[test]
    fn negative_damage_changes_nothing() {
        let mut session = session();
        let id = session.add_enemy("sentry").unwrap();
        let before = session.get(id.as_str()).unwrap().clone();

        let request = AttackRequest {
            burn: true,
            ..AttackRequest::new(-1)
        };
        let err = session.apply_attack(id.as_str(), request).unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::InvalidArgument));
        assert_eq!(session.get(id.as_str()).unwrap(), &before);
    }

    #[test]
    fn players_reject_stat_commands() {
        let mut session = session();
        let p = session.add_player().unwrap();

        assert!(matches!(
            session.apply_attack(p.as_str(), AttackRequest::new(3)),
            Err(RuntimeError::PlayerHasNoStats(_))
        ));
        assert!(matches!(
            session.apply_heal(p.as_str(), Heal::hp(1)),
            Err(RuntimeError::PlayerHasNoStats(_))
        ));
        assert!(matches!(
            session.set_loot(p.as_str(), RolledLoot::default()),
            Err(RuntimeError::PlayerHasNoStats(_))
        ));
    }

    #[test]
    fn loot_is_stored_for_template_enemies_only() {
        let mut session = session();
        let id = session.add_enemy("sentry").unwrap();
        let custom = session
            .add_custom(&CustomEnemy {
                name: "Dummy".into(),
                hp: 5,
                armor: 0,
                magic_armor: 0,
                draws: 1,
                movement: 1,
                core_deck: "wall".into(),
            })
            .unwrap();

        let mut loot = RolledLoot::default();
        loot.other.push("shield".into());
        session.set_loot(id.as_str(), loot.clone()).unwrap();
        let enemy = session.get(id.as_str()).unwrap();
        assert!(enemy.loot_rolled);
        assert_eq!(enemy.rolled_loot.as_ref(), Some(&loot));

        assert!(matches!(
            session.set_loot(custom.as_str(), loot),
            Err(RuntimeError::CustomHasNoLoot(_))
        ));
    }

    #[test]
    fn heal_is_clamped_and_logged() {
        let mut session = session();
        let id = session.add_enemy("sentry").unwrap();
        session
            .apply_attack(id.as_str(), AttackRequest::new(5))
            .unwrap();

        let log = session.apply_heal(id.as_str(), Heal::hp(100)).unwrap();
        assert_eq!(log.hp_after, 10);
    }
}
