use std::collections::BTreeMap;

use super::{CardId, DeckState, InstanceId, StatusKind, Statuses};
use crate::config::BattleConfig;

/// Loot rolled for a combatant by an external roller.
///
/// The engine never computes loot; it only carries the result so that a
/// save/restore cycle keeps it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RolledLoot {
    /// Currency amounts keyed by kind (`cp`, `sp`, `gp`).
    pub currency: BTreeMap<String, u32>,
    /// Resource amounts keyed by kind (`willpower`).
    pub resources: BTreeMap<String, u32>,
    /// Free-text loot lines.
    pub other: Vec<String>,
}

/// Mutable runtime entity tracked in a roster.
///
/// Field names match the persisted-state shape one-to-one, so serializing and
/// restoring a combatant is lossless.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub instance_id: InstanceId,
    /// Template this combatant was spawned from; `"player"` marks an inert
    /// roster entry and `"custom"` an enemy built from ad-hoc stats.
    pub template_id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: Option<String>,

    pub hp_current: u32,
    pub hp_max: u32,
    pub armor_current: u32,
    pub armor_max: u32,
    pub magic_armor_current: u32,
    pub magic_armor_max: u32,

    /// Guard restored at every turn start.
    pub guard_base: u32,
    /// Consumable guard pool. No maximum; floored at zero by consumption.
    pub guard_current: u32,

    /// Cards drawn per turn before status modifiers.
    pub draws_base: u32,
    /// Base movement; see [`Combatant::effective_movement`].
    pub movement: u32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub statuses: Statuses,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deck_state: DeckState,

    /// Cards drawn by the most recent turn, kept for display.
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_drawn: Vec<CardId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rolled_loot: Option<RolledLoot>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot_rolled: bool,
}

impl Combatant {
    /// Returns true for inert player entries that carry no combat stats.
    pub fn is_player(&self) -> bool {
        self.template_id == BattleConfig::PLAYER_TEMPLATE_ID
    }

    /// Returns true for enemies built without a template.
    pub fn is_custom(&self) -> bool {
        self.template_id == BattleConfig::CUSTOM_TEMPLATE_ID
    }

    /// A downed combatant stays in the roster but no longer draws.
    pub fn is_down(&self) -> bool {
        !self.is_player() && self.hp_current == 0
    }

    /// Movement after status modifiers: halved (floor) while slowed.
    pub fn effective_movement(&self) -> u32 {
        if self.statuses.contains(StatusKind::Slowed) {
            self.movement / 2
        } else {
            self.movement
        }
    }

    /// Cards this combatant draws in its draw phase.
    pub fn draw_count(&self) -> u32 {
        let penalty = u32::from(self.statuses.contains(StatusKind::Paralyzed));
        self.draws_base.saturating_sub(penalty)
    }

    /// Stores an externally rolled loot result.
    pub fn set_rolled_loot(&mut self, loot: RolledLoot) {
        self.rolled_loot = Some(loot);
        self.loot_rolled = true;
    }

    /// Checks `0 <= current <= max` for every vital.
    pub fn vitals_within_bounds(&self) -> bool {
        self.hp_current <= self.hp_max
            && self.armor_current <= self.armor_max
            && self.magic_armor_current <= self.magic_armor_max
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::combatant;
    use super::*;

    #[test]
    fn slowed_halves_movement_rounding_down() {
        let mut enemy = combatant(10, 0, 0, 0);
        assert_eq!(enemy.effective_movement(), 5);

        enemy.statuses.set_transient(StatusKind::Slowed);
        assert_eq!(enemy.effective_movement(), 2);

        enemy.movement = 0;
        assert_eq!(enemy.effective_movement(), 0);
    }

    #[test]
    fn paralyzed_draws_one_fewer_but_never_negative() {
        let mut enemy = combatant(10, 0, 0, 0);
        enemy.statuses.set_transient(StatusKind::Paralyzed);
        assert_eq!(enemy.draw_count(), 1);

        enemy.draws_base = 0;
        assert_eq!(enemy.draw_count(), 0);
    }

    #[test]
    fn players_are_never_down() {
        let mut entry = combatant(0, 0, 0, 0);
        assert!(entry.is_down());

        entry.template_id = BattleConfig::PLAYER_TEMPLATE_ID.into();
        assert!(entry.is_player());
        assert!(!entry.is_down());
    }

    #[test]
    fn storing_loot_sets_the_flag() {
        let mut enemy = combatant(10, 0, 0, 0);
        let mut loot = RolledLoot::default();
        loot.currency.insert("gp".into(), 3);

        enemy.set_rolled_loot(loot.clone());
        assert!(enemy.loot_rolled);
        assert_eq!(enemy.rolled_loot, Some(loot));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_round_trips_through_json() {
        let mut enemy = combatant(12, 3, 2, 1);
        enemy.hp_current = 7;
        enemy.statuses.add_stacks(StatusKind::Burn, 2);
        enemy.statuses.set_transient(StatusKind::Paralyzed);
        enemy.deck_state = DeckState::with_draw_pile(["a", "b"].map(CardId::from));
        enemy.deck_state.discard_pile.push(CardId::from("c"));
        enemy.deck_state.hand.push(CardId::from("d"));
        enemy.last_drawn = vec![CardId::from("d")];
        enemy.set_rolled_loot(RolledLoot {
            other: vec!["rusty key".into()],
            ..RolledLoot::default()
        });

        let json = serde_json::to_string(&enemy).unwrap();
        let restored: Combatant = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, enemy);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn persisted_field_names_are_flat() {
        let value = serde_json::to_value(combatant(5, 1, 2, 3)).unwrap();
        for key in [
            "instance_id",
            "template_id",
            "hp_current",
            "hp_max",
            "armor_current",
            "magic_armor_max",
            "guard_base",
            "guard_current",
            "draws_base",
            "movement",
            "statuses",
            "deck_state",
            "last_drawn",
            "rolled_loot",
            "loot_rolled",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value["deck_state"].get("draw_pile").is_some());
    }
}
