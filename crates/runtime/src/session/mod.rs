//! Battle session: the roster plus the driver-level turn bookkeeping.
//!
//! A [`BattleSession`] owns everything one battle needs: the combatants, their
//! display order, the selected combatant, the active-turn pointer and the
//! seeded generator every shuffle and roll draws from. It enforces the rule
//! the engine leaves to its driver: at most one combatant holds the active
//! turn at any time.
//!
//! Every command validates before it mutates, so a rejected command leaves
//! the session exactly as it was.

mod actions;
mod naming;
mod snapshot;
mod turns;

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use battle_core::{
    Catalog, Combatant, CustomEnemy, InstanceId, Roster, TurnStage, spawn_custom, spawn_enemy,
    spawn_player,
};

pub use actions::AttackRequest;
pub use turns::{NextTurn, TurnReport};

use crate::api::{Result, RuntimeError};
use naming::NameCounters;

/// Direction for [`BattleSession::move_in_order`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderMove {
    Earlier,
    Later,
}

/// One battle's mutable state.
pub struct BattleSession {
    sid: String,
    catalog: Arc<Catalog>,
    rng: ChaCha8Rng,
    roster: Roster,
    order: Vec<InstanceId>,
    selected: Option<InstanceId>,
    active_turn: Option<InstanceId>,
    turn_in_progress: bool,
    names: NameCounters,
}

impl BattleSession {
    /// Creates an empty session whose generator is seeded with `seed`.
    pub fn new(sid: impl Into<String>, catalog: Arc<Catalog>, seed: u64) -> Self {
        Self {
            sid: sid.into(),
            catalog,
            rng: ChaCha8Rng::seed_from_u64(seed),
            roster: Roster::new(),
            order: Vec::new(),
            selected: None,
            active_turn: None,
            turn_in_progress: false,
            names: NameCounters::default(),
        }
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn get(&self, id: &str) -> Option<&Combatant> {
        self.roster.get(id)
    }

    /// Instance ids in display order.
    pub fn order(&self) -> &[InstanceId] {
        &self.order
    }

    /// Combatants in display order.
    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.order.iter().filter_map(|id| self.roster.get(id.as_str()))
    }

    pub fn selected_id(&self) -> Option<&InstanceId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Combatant> {
        self.selected
            .as_ref()
            .and_then(|id| self.roster.get(id.as_str()))
    }

    /// Selected id, or [`RuntimeError::NoSelection`].
    pub fn require_selected(&self) -> Result<InstanceId> {
        self.selected.clone().ok_or(RuntimeError::NoSelection)
    }

    pub fn active_turn_id(&self) -> Option<&InstanceId> {
        self.active_turn.as_ref()
    }

    pub fn turn_in_progress(&self) -> bool {
        self.turn_in_progress
    }

    /// Where `id` stands in the turn cycle.
    pub fn stage_of(&self, id: &str) -> TurnStage {
        match &self.active_turn {
            Some(active) if active.as_str() == id && self.turn_in_progress => TurnStage::InProgress,
            Some(active) if active.as_str() == id => TurnStage::TurnStarted,
            _ => TurnStage::Idle,
        }
    }

    /// Selects a combatant.
    pub fn select(&mut self, id: &str) -> Result<()> {
        let combatant = self.roster.get(id).ok_or_else(|| unknown(id))?;
        self.selected = Some(combatant.instance_id.clone());
        Ok(())
    }

    /// Advances the selection round-robin through the display order.
    pub fn select_next(&mut self) -> Option<&InstanceId> {
        let next = match &self.selected {
            _ if self.order.is_empty() => None,
            Some(current) => match self.order.iter().position(|id| id == current) {
                Some(index) => Some(self.order[(index + 1) % self.order.len()].clone()),
                None => self.order.first().cloned(),
            },
            None => self.order.first().cloned(),
        };
        self.selected = next;
        self.selected.as_ref()
    }

    /// Swaps `id` with its neighbour. Returns false when it is already at
    /// that end of the order or not in it.
    pub fn move_in_order(&mut self, id: &str, direction: OrderMove) -> bool {
        let Some(index) = self.order.iter().position(|i| i.as_str() == id) else {
            return false;
        };
        let target = match direction {
            OrderMove::Earlier => index.checked_sub(1),
            OrderMove::Later => Some(index + 1).filter(|&t| t < self.order.len()),
        };
        match target {
            Some(target) => {
                self.order.swap(index, target);
                true
            }
            None => false,
        }
    }

    /// Spawns an enemy from a template, named `"<template name> <n>"`.
    pub fn add_enemy(&mut self, template_id: &str) -> Result<InstanceId> {
        let template = self
            .catalog
            .template(template_id)
            .ok_or_else(|| RuntimeError::UnknownTemplate(template_id.to_owned()))?;

        let mut combatant = spawn_enemy(template, &self.catalog, &mut self.rng)?;
        combatant.name = self.names.next_enemy(&template.name);

        tracing::info!(
            "Spawned {} ({}) hp={} armor={} guard_base={}",
            combatant.name,
            combatant.instance_id,
            combatant.hp_max,
            combatant.armor_max,
            combatant.guard_base
        );
        self.insert(combatant)
    }

    /// Spawns an enemy from fixed stats.
    pub fn add_custom(&mut self, custom: &CustomEnemy) -> Result<InstanceId> {
        let combatant = spawn_custom(custom, &self.catalog, &mut self.rng)?;
        tracing::info!("Spawned custom {} ({})", combatant.name, combatant.instance_id);
        self.insert(combatant)
    }

    /// Adds an inert player entry named `"Player <n>"`.
    pub fn add_player(&mut self) -> Result<InstanceId> {
        let name = self.names.next_player();
        let combatant = spawn_player(name, &mut self.rng);
        tracing::info!("Added {} ({})", combatant.name, combatant.instance_id);
        self.insert(combatant)
    }

    fn insert(&mut self, mut combatant: Combatant) -> Result<InstanceId> {
        // A resumed session replays its seed, so fresh ids can collide with
        // restored ones.
        while self.roster.contains(combatant.instance_id.as_str()) {
            combatant.instance_id = InstanceId::random(&mut self.rng);
        }
        let id = combatant.instance_id.clone();
        self.roster.add(combatant)?;
        self.order.push(id.clone());
        self.selected = Some(id.clone());
        Ok(id)
    }

    /// Removes a combatant, releasing the active turn if it held it.
    pub fn delete(&mut self, id: &str) -> Result<Combatant> {
        let removed = self.roster.remove(id).ok_or_else(|| unknown(id))?;

        if self.active_turn.as_ref() == Some(&removed.instance_id) {
            self.active_turn = None;
            self.turn_in_progress = false;
        }
        self.order.retain(|i| *i != removed.instance_id);
        if self.selected.as_ref() == Some(&removed.instance_id) {
            self.selected = self.order.first().cloned();
        }

        tracing::info!("Removed {} ({})", removed.name, removed.instance_id);
        Ok(removed)
    }
}

fn unknown(id: &str) -> RuntimeError {
    battle_core::RosterError::UnknownInstance(InstanceId::from(id)).into()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use battle_core::{
        AttackModifiers, Card, CardId, Catalog, Deck, Effect, EnemyTemplate, LootEntry, LootKind,
        StatRange,
    };

    use super::BattleSession;

    fn card(id: &str, effect: Effect) -> Card {
        Card {
            id: CardId::from(id),
            title: id.to_owned(),
            weight: 1,
            effects: vec![effect],
        }
    }

    /// Decks made only of guard cards, so drawn guard is predictable.
    pub fn catalog() -> Catalog {
        let deck = Deck {
            id: "wall".into(),
            name: "Wall".into(),
            cards: vec![
                card("block_a", Effect::Guard { amount: 1 }),
                card("block_b", Effect::Guard { amount: 1 }),
            ],
        };
        let template = EnemyTemplate {
            id: "sentry".into(),
            name: "Sentry".into(),
            image: Some("sentry.png".into()),
            hp: StatRange::fixed(10),
            armor: StatRange::fixed(1),
            magic_armor: StatRange::ZERO,
            base_guard: StatRange::fixed(2),
            draws: 2,
            movement: 4,
            core_deck: "wall".into(),
            specials: vec![
                card("block_c", Effect::Guard { amount: 1 }),
                card("block_d", Effect::Guard { amount: 1 }),
                card(
                    "jab",
                    Effect::Attack {
                        amount: 1,
                        modifiers: AttackModifiers::empty(),
                    },
                ),
            ],
            loot: vec![LootEntry {
                kind: LootKind::Other,
                item: None,
                min: None,
                max: None,
                text: Some("shield".into()),
            }],
        };
        Catalog::from_parts([deck], [template]).expect("fixture catalog is valid")
    }

    pub fn session() -> BattleSession {
        BattleSession::new("test", Arc::new(catalog()), 7)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::session;
    use super::*;

    #[test]
    fn enemies_are_numbered_per_template() {
        let mut session = session();
        let a = session.add_enemy("sentry").unwrap();
        let b = session.add_enemy("sentry").unwrap();

        assert_eq!(session.get(a.as_str()).unwrap().name, "Sentry 1");
        assert_eq!(session.get(b.as_str()).unwrap().name, "Sentry 2");
        assert_eq!(session.order(), [a, b.clone()]);
        assert_eq!(session.selected_id(), Some(&b));
    }

    #[test]
    fn unknown_template_is_rejected() {
        let mut session = session();
        let err = session.add_enemy("dragon").unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownTemplate(id) if id == "dragon"));
        assert!(session.roster().is_empty());
    }

    #[test]
    fn players_are_numbered_separately() {
        let mut session = session();
        session.add_enemy("sentry").unwrap();
        let p = session.add_player().unwrap();
        assert_eq!(session.get(p.as_str()).unwrap().name, "Player 1");
    }

    #[test]
    fn select_next_wraps_around() {
        let mut session = session();
        let a = session.add_enemy("sentry").unwrap();
        let b = session.add_player().unwrap();

        assert_eq!(session.select_next(), Some(&a));
        assert_eq!(session.select_next(), Some(&b));
        assert_eq!(session.select_next(), Some(&a));
    }

    #[test]
    fn move_in_order_stops_at_the_ends() {
        let mut session = session();
        let a = session.add_enemy("sentry").unwrap();
        let b = session.add_enemy("sentry").unwrap();

        assert!(!session.move_in_order(a.as_str(), OrderMove::Earlier));
        assert!(session.move_in_order(a.as_str(), OrderMove::Later));
        assert_eq!(session.order(), [b.clone(), a.clone()]);
        assert!(!session.move_in_order(a.as_str(), OrderMove::Later));
        assert!(!session.move_in_order("missing", OrderMove::Later));
    }

    #[test]
    fn delete_releases_the_active_turn_and_reselects() {
        let mut session = session();
        let a = session.add_enemy("sentry").unwrap();
        let b = session.add_enemy("sentry").unwrap();
        session.enemy_turn(b.as_str()).unwrap();

        session.delete(b.as_str()).unwrap();

        assert_eq!(session.active_turn_id(), None);
        assert!(!session.turn_in_progress());
        assert_eq!(session.selected_id(), Some(&a));
        assert_eq!(session.order(), [a]);
    }

    #[test]
    fn deleting_an_unknown_id_fails() {
        let mut session = session();
        assert!(matches!(
            session.delete("nope"),
            Err(RuntimeError::Roster(_))
        ));
    }
}
