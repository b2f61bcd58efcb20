//! Turn lifecycle: start-of-turn reset, draw phase, end-of-turn cleanup.
//!
//! A combatant's turn moves `Idle → TurnStarted → InProgress → Idle`, or
//! `Idle → TurnStarted → Idle` when the driver skips the draw. These functions
//! run the hooks for one combatant; keeping a single active turn across the
//! roster is the driver's job.
mod hooks;
mod lifecycle;

pub use hooks::{TurnHookLog, TurnPhase, on_turn_end, on_turn_start};
pub use lifecycle::{
    SkippedTurn, TurnEnd, TurnStage, TurnStart, end_turn, enemy_turn, turn_without_draw,
};
