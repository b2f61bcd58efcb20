use crate::state::{Combatant, InstanceId, StatusKind};

/// Which combat operation produced a log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatAction {
    Attack,
    Heal,
}

/// Before/after record of one combat operation, for display and audit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLog {
    pub instance_id: InstanceId,
    pub action: CombatAction,

    pub hp_before: u32,
    pub hp_after: u32,
    pub guard_before: u32,
    pub guard_after: u32,
    pub armor_before: u32,
    pub armor_after: u32,
    pub magic_armor_before: u32,
    pub magic_armor_after: u32,

    // Attack-only details; zero for heals.
    pub input_damage: u32,
    pub ignored_regular: u32,
    pub ignored_magic: u32,
    /// Damage absorbed by guard, armor and magic armor combined.
    pub guarded_total: u32,
    pub damage_to_hp: u32,

    pub applied_statuses: Vec<StatusKind>,
}

impl CombatLog {
    /// Starts a log from the combatant's current defensive state.
    pub(crate) fn begin(combatant: &Combatant, action: CombatAction) -> Self {
        Self {
            instance_id: combatant.instance_id.clone(),
            action,
            hp_before: combatant.hp_current,
            hp_after: combatant.hp_current,
            guard_before: combatant.guard_current,
            guard_after: combatant.guard_current,
            armor_before: combatant.armor_current,
            armor_after: combatant.armor_current,
            magic_armor_before: combatant.magic_armor_current,
            magic_armor_after: combatant.magic_armor_current,
            input_damage: 0,
            ignored_regular: 0,
            ignored_magic: 0,
            guarded_total: 0,
            damage_to_hp: 0,
            applied_statuses: Vec::new(),
        }
    }

    /// Records the combatant's state after the operation.
    pub(crate) fn finish(mut self, combatant: &Combatant) -> Self {
        self.hp_after = combatant.hp_current;
        self.guard_after = combatant.guard_current;
        self.armor_after = combatant.armor_current;
        self.magic_armor_after = combatant.magic_armor_current;
        self
    }
}
