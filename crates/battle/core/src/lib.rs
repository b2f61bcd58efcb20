//! Deterministic combat rules and turn lifecycle for tabletop-style battles.
//!
//! `battle-core` defines the canonical rules (mitigation algebra, deck/draw
//! engine, turn hooks) and exposes pure APIs that drivers reuse. Nothing in
//! this crate touches a display, a file, or a socket: callers pass in an
//! immutable [`Catalog`], the [`Combatant`] to mutate, and an explicit random
//! generator, and get structured logs back.
pub mod catalog;
pub mod combat;
pub mod config;
pub mod draw;
pub mod error;
pub mod spawn;
pub mod state;
pub mod turn;

pub use catalog::{
    AttackModifiers, Card, Catalog, CatalogError, Deck, Effect, EnemyTemplate, LootEntry,
    LootKind, StatRange,
};
pub use combat::{CombatAction, CombatError, CombatLog, Heal, apply_attack, apply_heal};
pub use config::BattleConfig;
pub use draw::{DrawError, DrawResult, draw_cards};
pub use error::{BattleError, ErrorKind};
pub use spawn::{CustomEnemy, SpawnError, build_deck_pool, spawn_custom, spawn_enemy, spawn_player};
pub use state::{
    CardId, Combatant, DeckState, InstanceId, RolledLoot, Roster, RosterError, Status, StatusKind,
    Statuses,
};
pub use turn::{
    SkippedTurn, TurnEnd, TurnHookLog, TurnPhase, TurnStage, TurnStart, end_turn, enemy_turn,
    on_turn_end, on_turn_start, turn_without_draw,
};
