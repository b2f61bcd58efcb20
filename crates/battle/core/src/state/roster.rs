use std::collections::BTreeMap;

use super::{Combatant, InstanceId};
use crate::error::{BattleError, ErrorKind};

/// Errors raised when the roster's id invariant would be broken.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("duplicate instance_id '{0}'")]
    DuplicateInstance(InstanceId),

    #[error("no combatant with instance_id '{0}'")]
    UnknownInstance(InstanceId),
}

impl BattleError for RosterError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateInstance(_) => ErrorKind::DataIntegrity,
            Self::UnknownInstance(_) => ErrorKind::IllegalTransition,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateInstance(_) => "ROSTER_DUPLICATE_INSTANCE",
            Self::UnknownInstance(_) => "ROSTER_UNKNOWN_INSTANCE",
        }
    }
}

/// Keyed collection of the combatants in one battle.
///
/// A combatant lives here until it is explicitly removed; reaching zero hp
/// does not remove it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    combatants: BTreeMap<InstanceId, Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a combatant. Fails without modifying the roster if the id is taken.
    pub fn add(&mut self, combatant: Combatant) -> Result<(), RosterError> {
        if self.combatants.contains_key(&combatant.instance_id) {
            return Err(RosterError::DuplicateInstance(combatant.instance_id));
        }
        self.combatants
            .insert(combatant.instance_id.clone(), combatant);
        Ok(())
    }

    /// Removes and returns a combatant; removing an absent id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Combatant> {
        self.combatants.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&Combatant> {
        self.combatants.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Combatant> {
        self.combatants.get_mut(id)
    }

    /// Like [`Roster::get_mut`], but reports a missing id as an error.
    pub fn require_mut(&mut self, id: &str) -> Result<&mut Combatant, RosterError> {
        self.combatants
            .get_mut(id)
            .ok_or_else(|| RosterError::UnknownInstance(InstanceId::from(id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.combatants.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &InstanceId> {
        self.combatants.keys()
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}

impl IntoIterator for Roster {
    type Item = Combatant;
    type IntoIter = std::collections::btree_map::IntoValues<InstanceId, Combatant>;

    fn into_iter(self) -> Self::IntoIter {
        self.combatants.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::combatant::fixtures::combatant;

    #[test]
    fn rejects_duplicate_ids_without_replacing() {
        let mut roster = Roster::new();
        roster.add(combatant(10, 0, 0, 0)).unwrap();

        let mut twin = combatant(99, 0, 0, 0);
        twin.name = "Impostor".into();
        let err = roster.add(twin).unwrap_err();

        assert!(matches!(err, RosterError::DuplicateInstance(_)));
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get("test0001").unwrap().name, "Goblin 1");
    }

    #[test]
    fn downed_combatants_stay_until_removed() {
        let mut roster = Roster::new();
        let mut enemy = combatant(10, 0, 0, 0);
        enemy.hp_current = 0;
        roster.add(enemy).unwrap();

        assert!(roster.contains("test0001"));
        assert!(roster.remove("test0001").is_some());
        assert!(roster.remove("test0001").is_none());
        assert!(roster.is_empty());
    }

    #[test]
    fn require_mut_reports_unknown_ids() {
        let mut roster = Roster::new();
        let err = roster.require_mut("nobody").unwrap_err();
        assert_eq!(err, RosterError::UnknownInstance(InstanceId::from("nobody")));
        assert_eq!(err.kind(), ErrorKind::IllegalTransition);
    }
}
