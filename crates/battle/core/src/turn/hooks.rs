use crate::state::{Combatant, InstanceId, StatusKind};

/// Which hook produced a [`TurnHookLog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnPhase {
    Start,
    End,
}

/// Before/after record of a turn hook.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnHookLog {
    pub instance_id: InstanceId,
    pub phase: TurnPhase,
    pub hp_before: u32,
    pub hp_after: u32,
    pub guard_before: u32,
    pub guard_after: u32,
    /// Damage-over-time applied; always zero at turn end.
    pub dot_damage: u32,
    /// Statuses that expired; always empty at turn start.
    pub removed_statuses: Vec<StatusKind>,
}

impl TurnHookLog {
    fn begin(combatant: &Combatant, phase: TurnPhase) -> Self {
        Self {
            instance_id: combatant.instance_id.clone(),
            phase,
            hp_before: combatant.hp_current,
            hp_after: combatant.hp_current,
            guard_before: combatant.guard_current,
            guard_after: combatant.guard_current,
            dot_damage: 0,
            removed_statuses: Vec::new(),
        }
    }

    fn finish(mut self, combatant: &Combatant) -> Self {
        self.hp_after = combatant.hp_current;
        self.guard_after = combatant.guard_current;
        self
    }
}

/// Resets guard to its base and ticks burn and poison.
///
/// Damage-over-time goes straight to hp: guard, armor and magic armor never
/// reduce it.
pub fn on_turn_start(combatant: &mut Combatant) -> TurnHookLog {
    let mut log = TurnHookLog::begin(combatant, TurnPhase::Start);

    combatant.guard_current = combatant.guard_base;

    let dot = combatant.statuses.dot_damage();
    combatant.hp_current = combatant.hp_current.saturating_sub(dot);
    log.dot_damage = dot;

    log.finish(combatant)
}

/// Discards the hand and expires single-turn statuses.
///
/// Burn and poison persist.
pub fn on_turn_end(combatant: &mut Combatant) -> TurnHookLog {
    let mut log = TurnHookLog::begin(combatant, TurnPhase::End);

    combatant.deck_state.discard_hand();

    for kind in [StatusKind::Paralyzed, StatusKind::Slowed] {
        if combatant.statuses.remove(kind) {
            log.removed_statuses.push(kind);
        }
    }

    log.finish(combatant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::combatant::fixtures::combatant;
    use crate::state::{CardId, DeckState};

    #[test]
    fn turn_start_resets_guard_and_applies_dot_through_armor() {
        let mut enemy = combatant(10, 3, 5, 5);
        enemy.guard_current = 0;
        enemy.statuses.add_stacks(StatusKind::Burn, 2);
        enemy.statuses.add_stacks(StatusKind::Poison, 1);

        let log = on_turn_start(&mut enemy);

        assert_eq!(log.phase, TurnPhase::Start);
        assert_eq!((log.guard_before, log.guard_after), (0, 3));
        assert_eq!(log.dot_damage, 3);
        assert_eq!((log.hp_before, log.hp_after), (10, 7));
        assert_eq!(enemy.armor_current, 5);
    }

    #[test]
    fn turn_start_guard_reset_discards_healed_guard() {
        let mut enemy = combatant(10, 2, 0, 0);
        enemy.guard_current = 40;
        on_turn_start(&mut enemy);
        assert_eq!(enemy.guard_current, 2);
    }

    #[test]
    fn dot_floors_hp_at_zero() {
        let mut enemy = combatant(2, 0, 0, 0);
        enemy.statuses.add_stacks(StatusKind::Poison, 9);
        let log = on_turn_start(&mut enemy);
        assert_eq!(log.hp_after, 0);
        assert!(enemy.is_down());
    }

    #[test]
    fn turn_end_expires_only_single_turn_statuses() {
        let mut enemy = combatant(10, 0, 0, 0);
        enemy.statuses.add_stacks(StatusKind::Burn, 2);
        enemy.statuses.add_stacks(StatusKind::Poison, 4);
        enemy.statuses.set_transient(StatusKind::Paralyzed);
        enemy.statuses.set_transient(StatusKind::Slowed);

        let log = on_turn_end(&mut enemy);

        assert_eq!(log.removed_statuses, [StatusKind::Paralyzed, StatusKind::Slowed]);
        assert_eq!(enemy.statuses.stacks(StatusKind::Burn), 2);
        assert_eq!(enemy.statuses.stacks(StatusKind::Poison), 4);
        assert_eq!(enemy.statuses.len(), 2);
        assert_eq!(log.hp_before, log.hp_after);
    }

    #[test]
    fn turn_end_moves_hand_to_discard() {
        let mut enemy = combatant(10, 0, 0, 0);
        enemy.deck_state = DeckState::with_draw_pile([CardId::from("a")]);
        enemy.deck_state.hand = vec![CardId::from("b"), CardId::from("c")];

        on_turn_end(&mut enemy);

        assert!(enemy.deck_state.hand.is_empty());
        assert_eq!(enemy.deck_state.discard_pile, ["b", "c"].map(CardId::from));
        assert_eq!(enemy.deck_state.draw_pile.len(), 1);
    }
}
