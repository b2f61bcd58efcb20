use super::{CombatAction, CombatError, CombatLog};
use crate::config::BattleConfig;
use crate::state::Combatant;

/// Amounts restored by a heal. Every component must be non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Heal {
    pub hp: i32,
    pub armor: i32,
    pub magic_armor: i32,
    pub guard: i32,
}

impl Heal {
    pub const fn hp(amount: i32) -> Self {
        Self {
            hp: amount,
            armor: 0,
            magic_armor: 0,
            guard: 0,
        }
    }

    pub const fn guard(amount: i32) -> Self {
        Self {
            hp: 0,
            armor: 0,
            magic_armor: 0,
            guard: amount,
        }
    }

    fn validated(self) -> Result<[u32; 4], CombatError> {
        let check = |field: &'static str, amount: i32| {
            u32::try_from(amount).map_err(|_| CombatError::NegativeHeal { field, amount })
        };
        Ok([
            check("hp", self.hp)?,
            check("armor", self.armor)?,
            check("magic_armor", self.magic_armor)?,
            check("guard", self.guard)?,
        ])
    }
}

/// Restores hp, armor, magic armor and guard.
///
/// Hp and both armors clamp to their maximums. Guard has no declared maximum
/// and only clamps to [`BattleConfig::GUARD_CEILING`].
pub fn apply_heal(combatant: &mut Combatant, heal: Heal) -> Result<CombatLog, CombatError> {
    let [hp, armor, magic_armor, guard] = heal.validated()?;

    let log = CombatLog::begin(combatant, CombatAction::Heal);

    combatant.hp_current = combatant.hp_current.saturating_add(hp).min(combatant.hp_max);
    combatant.armor_current = combatant
        .armor_current
        .saturating_add(armor)
        .min(combatant.armor_max);
    combatant.magic_armor_current = combatant
        .magic_armor_current
        .saturating_add(magic_armor)
        .min(combatant.magic_armor_max);
    combatant.guard_current = combatant
        .guard_current
        .saturating_add(guard)
        .min(BattleConfig::GUARD_CEILING);

    Ok(log.finish(combatant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AttackModifiers;
    use crate::combat::apply_attack;
    use crate::state::combatant::fixtures::combatant;

    #[test]
    fn clamps_vitals_to_their_maximums() {
        let mut enemy = combatant(10, 0, 3, 2);
        enemy.hp_current = 4;
        enemy.armor_current = 1;
        enemy.magic_armor_current = 0;

        let log = apply_heal(
            &mut enemy,
            Heal {
                hp: 100,
                armor: 1,
                magic_armor: 9,
                guard: 0,
            },
        )
        .unwrap();

        assert_eq!(log.action, CombatAction::Heal);
        assert_eq!((log.hp_before, log.hp_after), (4, 10));
        assert_eq!((log.armor_before, log.armor_after), (1, 2));
        assert_eq!(log.magic_armor_after, 2);
    }

    #[test]
    fn guard_grows_past_base_up_to_the_ceiling() {
        let mut enemy = combatant(10, 2, 0, 0);
        apply_heal(&mut enemy, Heal::guard(5)).unwrap();
        assert_eq!(enemy.guard_current, 7);

        apply_heal(&mut enemy, Heal::guard(i32::MAX)).unwrap();
        assert_eq!(enemy.guard_current, BattleConfig::GUARD_CEILING);
    }

    #[test]
    fn any_negative_component_rejects_the_whole_heal() {
        let mut enemy = combatant(10, 0, 2, 0);
        enemy.hp_current = 1;
        let before = enemy.clone();

        let err = apply_heal(
            &mut enemy,
            Heal {
                hp: 5,
                guard: -2,
                ..Heal::default()
            },
        )
        .unwrap_err();

        assert_eq!(
            err,
            CombatError::NegativeHeal {
                field: "guard",
                amount: -2
            }
        );
        assert_eq!(enemy, before);
    }

    #[test]
    fn heal_after_attack_restores_consumed_guard() {
        let mut enemy = combatant(10, 3, 0, 0);
        apply_attack(&mut enemy, 3, AttackModifiers::empty()).unwrap();
        assert_eq!(enemy.guard_current, 0);

        let log = apply_heal(&mut enemy, Heal::guard(3)).unwrap();
        assert_eq!((log.guard_before, log.guard_after), (0, 3));
        assert_eq!(log.damage_to_hp, 0);
    }
}
