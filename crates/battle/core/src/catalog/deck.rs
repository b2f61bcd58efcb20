use super::Card;
use crate::state::CardId;

/// Immutable deck definition: an ordered list of unique cards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub cards: Vec<Card>,
}

impl Deck {
    /// Card ids repeated by weight, in catalog order, before any shuffle.
    ///
    /// A card appears `weight` times, which sets its draw probability.
    pub fn pool(&self) -> Vec<CardId> {
        weighted_pool(&self.cards)
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id.as_str() == id)
    }
}

/// Expands cards into a pool with `weight` copies of each id.
pub(crate) fn weighted_pool<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Vec<CardId> {
    cards
        .into_iter()
        .flat_map(|card| std::iter::repeat_n(card.id.clone(), card.weight as usize))
        .collect()
}
