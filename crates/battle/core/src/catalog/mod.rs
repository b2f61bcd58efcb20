//! Immutable content catalog: cards, decks and enemy templates.
//!
//! A [`Catalog`] is built once (usually by `battle-content`) and passed by
//! reference into spawn and display operations. It enforces the cross-record
//! invariants at insertion time: unique ids, and every template's core deck
//! must already be present. Field-level validation (positive weights,
//! non-empty effect lists, `min <= max`) is the loader's job.
mod card;
mod deck;
mod template;

use std::collections::{BTreeMap, HashMap};

pub use card::{AttackModifiers, Card, Effect};
pub use deck::Deck;
pub(crate) use deck::weighted_pool;
pub use template::{EnemyTemplate, LootEntry, LootKind, StatRange};

use crate::error::{BattleError, ErrorKind};
use crate::state::CardId;

/// Errors raised while assembling a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate deck id '{0}'")]
    DuplicateDeck(String),

    #[error("duplicate enemy id '{0}'")]
    DuplicateTemplate(String),

    #[error("enemy template '{template}' refers to missing deck '{deck}'")]
    MissingDeck { template: String, deck: String },
}

impl BattleError for CatalogError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::DataIntegrity
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateDeck(_) => "CATALOG_DUPLICATE_DECK",
            Self::DuplicateTemplate(_) => "CATALOG_DUPLICATE_TEMPLATE",
            Self::MissingDeck { .. } => "CATALOG_MISSING_DECK",
        }
    }
}

/// Decks and enemy templates for one battle session.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    decks: BTreeMap<String, Deck>,
    templates: BTreeMap<String, EnemyTemplate>,
    cards: HashMap<CardId, Card>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from decks first, then templates.
    pub fn from_parts(
        decks: impl IntoIterator<Item = Deck>,
        templates: impl IntoIterator<Item = EnemyTemplate>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for deck in decks {
            catalog.insert_deck(deck)?;
        }
        for template in templates {
            catalog.insert_template(template)?;
        }
        Ok(catalog)
    }

    pub fn insert_deck(&mut self, deck: Deck) -> Result<(), CatalogError> {
        if self.decks.contains_key(&deck.id) {
            return Err(CatalogError::DuplicateDeck(deck.id));
        }
        self.index_cards(&deck.cards);
        self.decks.insert(deck.id.clone(), deck);
        Ok(())
    }

    pub fn insert_template(&mut self, template: EnemyTemplate) -> Result<(), CatalogError> {
        if self.templates.contains_key(&template.id) {
            return Err(CatalogError::DuplicateTemplate(template.id));
        }
        if !self.decks.contains_key(&template.core_deck) {
            return Err(CatalogError::MissingDeck {
                template: template.id,
                deck: template.core_deck,
            });
        }
        self.index_cards(&template.specials);
        self.templates.insert(template.id.clone(), template);
        Ok(())
    }

    fn index_cards(&mut self, cards: &[Card]) {
        for card in cards {
            self.cards.insert(card.id.clone(), card.clone());
        }
    }

    pub fn deck(&self, id: &str) -> Option<&Deck> {
        self.decks.get(id)
    }

    pub fn template(&self, id: &str) -> Option<&EnemyTemplate> {
        self.templates.get(id)
    }

    /// Decks in id order.
    pub fn decks(&self) -> impl Iterator<Item = &Deck> {
        self.decks.values()
    }

    /// Templates in id order.
    pub fn templates(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.templates.values()
    }

    /// Looks up a card across every deck and every template's specials.
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Effect summary of a card, or the raw id for an unknown card.
    pub fn card_text(&self, id: &str) -> String {
        self.card(id)
            .map_or_else(|| id.to_owned(), Card::effect_text)
    }

    /// Summary of several cards, truncated to `max_items` with a `(+n more)` suffix.
    pub fn hand_text(&self, ids: &[CardId], max_items: usize) -> String {
        if ids.is_empty() {
            return "—".to_owned();
        }
        let shown: Vec<String> = ids
            .iter()
            .take(max_items)
            .map(|id| self.card_text(id.as_str()))
            .collect();
        let mut text = shown.join(", ");
        if ids.len() > max_items {
            text.push_str(&format!(" (+{} more)", ids.len() - max_items));
        }
        text
    }
}
