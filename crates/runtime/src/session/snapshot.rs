//! Conversion between a live session and its persisted payload.

use std::collections::HashSet;

use battle_core::{InstanceId, Roster};

use super::{BattleSession, naming::NameCounters};
use crate::api::Result;
use crate::repository::{RepositoryError, SavePayload, UiState};

impl BattleSession {
    /// Captures the session for saving. Combatants are written in display order.
    pub fn to_payload(&self) -> SavePayload {
        let ui = UiState {
            selected_id: self.selected.clone(),
            active_turn_id: self.active_turn.clone(),
            turn_in_progress: self.turn_in_progress,
        };
        let enemies = self.combatants().cloned().collect();
        SavePayload::new(self.sid.clone(), ui, self.order.clone(), enemies)
    }

    /// Replaces the session's battle state with a payload.
    ///
    /// The payload is fully validated before anything is replaced. Order
    /// entries without a combatant are dropped, combatants missing from the
    /// order are appended, and dangling selection or active-turn pointers
    /// fall back to the first combatant or to no active turn.
    pub fn restore(&mut self, payload: SavePayload) -> Result<()> {
        if payload.version > SavePayload::VERSION {
            return Err(RepositoryError::CorruptedData(format!(
                "unsupported save version {}",
                payload.version
            ))
            .into());
        }

        let mut roster = Roster::new();
        let mut listed = Vec::with_capacity(payload.enemies.len());
        for combatant in payload.enemies {
            if !combatant.vitals_within_bounds() {
                return Err(RepositoryError::CorruptedData(format!(
                    "combatant '{}' has vitals above their maximum",
                    combatant.instance_id
                ))
                .into());
            }
            listed.push(combatant.instance_id.clone());
            roster.add(combatant)?;
        }

        let mut seen = HashSet::new();
        let mut order: Vec<InstanceId> = payload
            .order
            .into_iter()
            .filter(|id| roster.contains(id.as_str()) && seen.insert(id.clone()))
            .collect();
        order.extend(listed.into_iter().filter(|id| !seen.contains(id)));

        let selected = payload
            .ui
            .selected_id
            .filter(|id| roster.contains(id.as_str()))
            .or_else(|| order.first().cloned());
        let active_turn = payload
            .ui
            .active_turn_id
            .filter(|id| roster.contains(id.as_str()));
        let turn_in_progress = active_turn.is_some() && payload.ui.turn_in_progress;

        self.names = NameCounters::rebuild(order.iter().filter_map(|id| roster.get(id.as_str())));
        self.roster = roster;
        self.order = order;
        self.selected = selected;
        self.active_turn = active_turn;
        self.turn_in_progress = turn_in_progress;

        tracing::info!(
            "Restored session {} with {} combatants",
            self.sid,
            self.roster.len()
        );
        Ok(())
    }
}
