//! Turn commands: the driver-level rules on top of the engine's lifecycle.

use battle_core::{
    CombatLog, Heal, InstanceId, SkippedTurn, TurnEnd, TurnStage, TurnStart, apply_heal, end_turn,
    enemy_turn, on_turn_end, turn_without_draw,
};

use super::BattleSession;
use crate::api::{Result, RuntimeError};

/// Output of [`BattleSession::enemy_turn`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TurnReport {
    pub turn: TurnStart,
    /// One heal log per drawn card that carries guard.
    pub guard_applied: Vec<CombatLog>,
}

/// Output of [`BattleSession::next`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NextTurn {
    /// The turn that was closed, if one was open.
    pub closed: Option<TurnEnd>,
    pub selected: Option<InstanceId>,
}

impl BattleSession {
    /// Rejects players and any start while a turn is already held.
    fn check_can_start(&self, id: &str) -> Result<InstanceId> {
        let combatant = self.roster.get(id).ok_or_else(|| super::unknown(id))?;
        if combatant.is_player() {
            return Err(RuntimeError::PlayerHasNoTurn(combatant.instance_id.clone()));
        }
        match &self.active_turn {
            Some(active) if *active == combatant.instance_id => {
                Err(RuntimeError::TurnAlreadyStarted(active.clone()))
            }
            Some(active) => Err(RuntimeError::AnotherTurnActive {
                active: active.clone(),
            }),
            None => Ok(combatant.instance_id.clone()),
        }
    }

    /// Starts a combatant's turn: guard reset, DOT, draw phase.
    ///
    /// Guard effects on the drawn cards are applied immediately. The
    /// combatant then holds the active turn until [`Self::end_turn`] or
    /// [`Self::next`] closes it.
    pub fn enemy_turn(&mut self, id: &str) -> Result<TurnReport> {
        let id = self.check_can_start(id)?;
        let combatant = self.roster.require_mut(id.as_str())?;

        let turn = enemy_turn(combatant, &mut self.rng);
        combatant.last_drawn = turn.draw.drawn.clone();

        let mut guard_applied = Vec::new();
        for card_id in &turn.draw.drawn {
            let Some(card) = self.catalog.card(card_id.as_str()) else {
                tracing::warn!("Drawn card {} is not in the catalog", card_id);
                continue;
            };
            let guard = card.guard_total();
            if guard > 0 {
                let amount = i32::try_from(guard).unwrap_or(i32::MAX);
                guard_applied.push(apply_heal(combatant, Heal::guard(amount))?);
            }
        }

        tracing::info!(
            "{} turn start: hp {} -> {}, dot {}, drew {} ({}), guard {}",
            combatant.name,
            turn.start.hp_before,
            turn.start.hp_after,
            turn.start.dot_damage,
            turn.draw.drawn.len(),
            self.catalog.hand_text(&turn.draw.drawn, 6),
            combatant.guard_current
        );

        self.active_turn = Some(id);
        self.turn_in_progress = true;
        Ok(TurnReport {
            turn,
            guard_applied,
        })
    }

    /// Runs a full turn with the draw skipped. The turn is closed on return.
    pub fn enemy_turn_no_draw(&mut self, id: &str) -> Result<SkippedTurn> {
        let id = self.check_can_start(id)?;
        let combatant = self.roster.require_mut(id.as_str())?;

        let skipped = turn_without_draw(combatant);
        tracing::info!(
            "{} skipped draw: hp {} -> {}, dot {}",
            combatant.name,
            skipped.start.hp_before,
            skipped.start.hp_after,
            skipped.start.dot_damage
        );
        Ok(skipped)
    }

    /// Closes the active turn. Only the active combatant with a drawn hand
    /// can end its turn this way.
    pub fn end_turn(&mut self, id: &str) -> Result<TurnEnd> {
        match self.stage_of(id) {
            TurnStage::InProgress => {}
            TurnStage::TurnStarted => {
                return Err(RuntimeError::TurnNotInProgress(InstanceId::from(id)));
            }
            TurnStage::Idle => return Err(RuntimeError::NotActive(InstanceId::from(id))),
        }

        let combatant = self.roster.require_mut(id)?;
        let ended = end_turn(combatant);
        tracing::info!(
            "{} turn end: discarded {}, cleared {:?}",
            combatant.name,
            ended.discarded,
            ended.end.removed_statuses
        );

        self.active_turn = None;
        self.turn_in_progress = false;
        Ok(ended)
    }

    /// Closes any open turn, then moves the selection to the next combatant
    /// in display order.
    pub fn next(&mut self) -> NextTurn {
        let closed = self.close_active_turn();
        let selected = self.select_next().cloned();
        NextTurn { closed, selected }
    }

    fn close_active_turn(&mut self) -> Option<TurnEnd> {
        let active = self.active_turn.clone()?;
        let stage = self.stage_of(active.as_str());
        self.active_turn = None;
        self.turn_in_progress = false;
        if !stage.can_end() {
            return None;
        }

        let combatant = self.roster.get_mut(active.as_str())?;
        if combatant.is_player() {
            return None;
        }
        let ended = if stage == TurnStage::InProgress {
            end_turn(combatant)
        } else {
            TurnEnd {
                discarded: 0,
                end: on_turn_end(combatant),
            }
        };
        tracing::info!("{} turn closed by next", combatant.name);
        Some(ended)
    }
}
