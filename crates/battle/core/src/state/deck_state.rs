use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;

use super::CardId;

/// The three card zones of a combatant.
///
/// Zones partition the combatant's cards: moving a card always removes it
/// from its source zone in the same step, so [`DeckState::total_cards`] is
/// invariant under draw, discard and reshuffle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckState {
    /// Cards in shuffle order; the front is drawn next.
    pub draw_pile: VecDeque<CardId>,
    pub discard_pile: Vec<CardId>,
    /// Cards drawn this turn, held until the end-of-turn discard.
    pub hand: Vec<CardId>,
}

impl DeckState {
    /// Creates a deck state with everything in the draw pile.
    pub fn with_draw_pile(cards: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            draw_pile: cards.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len() + self.hand.len()
    }

    /// Turns the discard pile into a freshly shuffled draw pile when the draw
    /// pile has run out. Returns true if a reshuffle happened.
    pub fn reshuffle_if_needed<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.draw_pile.is_empty() || self.discard_pile.is_empty() {
            return false;
        }
        let mut cards = std::mem::take(&mut self.discard_pile);
        cards.shuffle(rng);
        self.draw_pile = cards.into();
        true
    }

    /// Moves the front card of the draw pile into the hand.
    pub fn draw_one(&mut self) -> Option<CardId> {
        let card = self.draw_pile.pop_front()?;
        self.hand.push(card.clone());
        Some(card)
    }

    /// Moves the whole hand onto the discard pile. Returns the number moved.
    pub fn discard_hand(&mut self) -> usize {
        let moved = self.hand.len();
        self.discard_pile.append(&mut self.hand);
        moved
    }
}
