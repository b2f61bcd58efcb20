//! Deck/draw engine.
//!
//! Pulls cards from a combatant's draw pile into its hand, reshuffling the
//! discard pile back in whenever the draw pile runs dry. Running out of cards
//! everywhere is a normal outcome: the draw simply returns fewer cards.

use rand::Rng;

use crate::error::{BattleError, ErrorKind};
use crate::state::{CardId, Combatant, InstanceId};

/// Errors raised by the draw engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    #[error("draw count must be >= 0 (got {0})")]
    NegativeCount(i32),
}

impl BattleError for DrawError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }

    fn error_code(&self) -> &'static str {
        "DRAW_NEGATIVE_COUNT"
    }
}

/// Outcome of a draw request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawResult {
    pub instance_id: InstanceId,
    pub requested: u32,
    /// Card ids drawn, in draw order.
    pub drawn: Vec<CardId>,
    pub reshuffled: bool,
    pub draw_pile_after: usize,
    pub discard_pile_after: usize,
    pub hand_after: usize,
}

impl DrawResult {
    /// Result for a draw that did not touch any zone.
    pub(crate) fn empty(combatant: &Combatant) -> Self {
        Self::finish(combatant, 0, Vec::new(), false)
    }

    fn finish(combatant: &Combatant, requested: u32, drawn: Vec<CardId>, reshuffled: bool) -> Self {
        let deck = &combatant.deck_state;
        Self {
            instance_id: combatant.instance_id.clone(),
            requested,
            drawn,
            reshuffled,
            draw_pile_after: deck.draw_pile.len(),
            discard_pile_after: deck.discard_pile.len(),
            hand_after: deck.hand.len(),
        }
    }
}

/// Draws up to `count` cards into the combatant's hand.
///
/// Before every individual pull an empty draw pile is refilled from the
/// shuffled discard pile. The cards stay in hand until the turn ends.
pub fn draw_cards<R: Rng + ?Sized>(
    combatant: &mut Combatant,
    count: i32,
    rng: &mut R,
) -> Result<DrawResult, DrawError> {
    let count = u32::try_from(count).map_err(|_| DrawError::NegativeCount(count))?;
    Ok(draw_up_to(combatant, count, rng))
}

pub(crate) fn draw_up_to<R: Rng + ?Sized>(
    combatant: &mut Combatant,
    count: u32,
    rng: &mut R,
) -> DrawResult {
    let deck = &mut combatant.deck_state;
    // The request can exceed every card the combatant owns.
    let mut drawn = Vec::with_capacity(deck.total_cards().min(count as usize));
    let mut reshuffled = false;

    for _ in 0..count {
        reshuffled |= deck.reshuffle_if_needed(rng);
        match deck.draw_one() {
            Some(card) => drawn.push(card),
            None => break,
        }
    }

    DrawResult::finish(combatant, count, drawn, reshuffled)
}
