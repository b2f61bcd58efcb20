use rand::Rng;

use super::hooks::{TurnHookLog, on_turn_end, on_turn_start};
use crate::draw::{DrawResult, draw_up_to};
use crate::state::Combatant;

/// Per-combatant position in the turn cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnStage {
    /// Not the active combatant.
    #[default]
    Idle,
    /// Guard reset and DOT applied; draw not yet resolved.
    TurnStarted,
    /// Hand drawn, awaiting actions.
    InProgress,
}

impl TurnStage {
    /// A turn can be closed from either non-idle stage.
    pub const fn can_end(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Output of [`enemy_turn`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnStart {
    pub start: TurnHookLog,
    pub draw: DrawResult,
}

/// Output of [`end_turn`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnEnd {
    /// Cards moved from hand to discard.
    pub discarded: usize,
    pub end: TurnHookLog,
}

/// Output of [`turn_without_draw`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkippedTurn {
    pub start: TurnHookLog,
    pub end: TurnHookLog,
}

/// Runs the turn-start hook and then the draw phase.
///
/// A combatant downed by the start hook (or already at zero hp) draws
/// nothing and its piles stay untouched. Otherwise it draws
/// [`Combatant::draw_count`] cards.
pub fn enemy_turn<R: Rng + ?Sized>(combatant: &mut Combatant, rng: &mut R) -> TurnStart {
    let start = on_turn_start(combatant);

    let draw = if combatant.hp_current == 0 {
        DrawResult::empty(combatant)
    } else {
        let count = combatant.draw_count();
        draw_up_to(combatant, count, rng)
    };

    TurnStart { start, draw }
}

/// Closes a turn that drew cards.
pub fn end_turn(combatant: &mut Combatant) -> TurnEnd {
    let discarded = combatant.deck_state.discard_hand();
    let end = on_turn_end(combatant);
    TurnEnd { discarded, end }
}

/// Runs a full turn with the draw phase skipped.
pub fn turn_without_draw(combatant: &mut Combatant) -> SkippedTurn {
    let start = on_turn_start(combatant);
    let end = on_turn_end(combatant);
    SkippedTurn { start, end }
}
