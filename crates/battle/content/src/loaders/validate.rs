//! Field-level validation and conversion into `battle-core` types.
//!
//! A [`Report`] walks a raw record once, converting what it can and
//! collecting a message for everything it cannot. Converted values are only
//! used when the report ends up empty.

use std::collections::HashSet;

use battle_core::{
    AttackModifiers, BattleConfig, Card, CardId, Deck, Effect, EnemyTemplate, LootEntry, LootKind,
    StatRange,
};

use super::LoadResult;
use super::raw::{RawCard, RawDeck, RawEffect, RawEnemy, RawLoot, RawRange};

const CURRENCY_KINDS: [&str; 3] = ["cp", "sp", "gp"];
const RESOURCE_KINDS: [&str; 1] = ["willpower"];

#[derive(Debug, Default)]
pub(crate) struct Report {
    errors: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Fails with every collected message, or returns `value`.
    pub fn finish<T>(self, what: &str, value: T) -> LoadResult<T> {
        if self.errors.is_empty() {
            return Ok(value);
        }
        anyhow::bail!("{what} validation failed:\n- {}", self.errors.join("\n- "))
    }

    fn non_empty(&mut self, path: &str, what: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(format!("{path}: {what} is empty"));
        }
    }

    fn positive(&mut self, path: &str, value: i64) -> u32 {
        match u32::try_from(value) {
            Ok(v) if v > 0 => v,
            _ => {
                self.push(format!("{path} must be > 0 (got {value})"));
                0
            }
        }
    }

    fn non_negative(&mut self, path: &str, value: i64) -> u32 {
        u32::try_from(value).unwrap_or_else(|_| {
            self.push(format!("{path} cannot be negative (got {value})"));
            0
        })
    }

    fn range(&mut self, path: &str, raw: RawRange) -> StatRange {
        let (Ok(min), Ok(max)) = (u32::try_from(raw.min), u32::try_from(raw.max)) else {
            self.push(format!(
                "{path}: range cannot be negative (min={}, max={})",
                raw.min, raw.max
            ));
            return StatRange::ZERO;
        };
        if min > max {
            self.push(format!("{path}: min > max (min={min}, max={max})"));
        }
        StatRange::new(min, max)
    }

    fn effect(&mut self, path: &str, raw: &RawEffect) -> Option<Effect> {
        let amount = self.positive(&format!("{path}.amount"), raw.amount);
        match raw.kind.as_str() {
            "attack" => Some(Effect::Attack {
                amount,
                modifiers: AttackModifiers::from_tags(&raw.modifiers),
            }),
            "guard" | "block" => Some(Effect::Guard { amount }),
            other => {
                self.push(format!("{path}: unknown effect type '{other}'"));
                None
            }
        }
    }

    pub fn card(&mut self, path: &str, raw: &RawCard) -> Card {
        self.non_empty(path, "card id", &raw.id);
        let title = raw.title.clone().unwrap_or_else(|| raw.id.clone());
        self.non_empty(path, "card title", &title);
        let weight = self.positive(&format!("{path}.weight"), raw.weight);

        if raw.effects.is_empty() {
            self.push(format!("{path}: card must have at least 1 effect"));
        }
        let effects = raw
            .effects
            .iter()
            .enumerate()
            .filter_map(|(i, e)| self.effect(&format!("{path}.effects[{i}]"), e))
            .collect();

        Card {
            id: CardId::new(raw.id.clone()),
            title,
            weight,
            effects,
        }
    }

    fn cards(&mut self, path: &str, label: &str, raw: &[RawCard]) -> Vec<Card> {
        let mut seen = HashSet::new();
        let mut cards = Vec::with_capacity(raw.len());
        for (i, card) in raw.iter().enumerate() {
            if !seen.insert(card.id.as_str()) {
                self.push(format!("{path}: duplicate {label} id '{}'", card.id));
            }
            cards.push(self.card(&format!("{path}[{i}]"), card));
        }
        cards
    }

    pub fn deck(&mut self, path: &str, raw: &RawDeck) -> Deck {
        self.non_empty(path, "deck id", &raw.id);
        let name = raw.name.clone().unwrap_or_else(|| raw.id.clone());
        self.non_empty(path, "deck name", &name);
        if raw.cards.is_empty() {
            self.push(format!("{path}: deck must have cards"));
        }
        let cards = self.cards(&format!("{path}.cards"), "card", &raw.cards);

        Deck {
            id: raw.id.clone(),
            name,
            cards,
        }
    }

    fn loot(&mut self, path: &str, raw: &RawLoot) -> Option<LootEntry> {
        let kind = match raw.kind.as_str() {
            "currency" => LootKind::Currency,
            "resource" => LootKind::Resource,
            "other" => LootKind::Other,
            other => {
                self.push(format!("{path}: unknown loot type '{other}'"));
                return None;
            }
        };

        let allowed: &[&str] = match kind {
            LootKind::Currency => &CURRENCY_KINDS,
            LootKind::Resource => &RESOURCE_KINDS,
            LootKind::Other => &[],
        };
        let (mut min, mut max) = (None, None);
        if kind == LootKind::Other {
            if raw.text.as_deref().is_none_or(|t| t.trim().is_empty()) {
                self.push(format!("{path}: other.text is required and cannot be empty"));
            }
        } else {
            let item = raw.item.as_deref().unwrap_or_default();
            if !allowed.contains(&item) {
                self.push(format!(
                    "{path}: {kind} kind must be one of {} (got '{item}')",
                    allowed.join("/")
                ));
            }
            match (raw.min, raw.max) {
                (Some(lo), Some(hi)) => {
                    let range = self.range(path, RawRange { min: lo, max: hi });
                    min = Some(range.min);
                    max = Some(range.max);
                }
                _ => self.push(format!("{path}: min/max required")),
            }
        }

        Some(LootEntry {
            kind,
            item: raw.item.clone(),
            min,
            max,
            text: raw.text.clone(),
        })
    }

    /// Validates a template against the set of already loaded deck ids.
    pub fn enemy(&mut self, path: &str, raw: &RawEnemy, decks: &HashSet<String>) -> EnemyTemplate {
        self.non_empty(path, "enemy id", &raw.id);
        let name = raw.name.clone().unwrap_or_else(|| raw.id.clone());
        self.non_empty(path, "enemy name", &name);

        let hp = self.range(&format!("{path}.hp"), raw.hp);
        let armor = self.range(&format!("{path}.armor"), raw.armor);
        let magic_armor = self.range(&format!("{path}.magicArmor"), raw.magic_armor);
        let base_guard = self.range(&format!("{path}.baseGuard"), raw.base_guard);

        let draws = self.positive(&format!("{path}.draws"), raw.draws);
        let movement = self.positive(&format!("{path}.movement"), raw.movement);

        if !decks.contains(&raw.core_deck) {
            self.push(format!(
                "{path}.coreDeck '{}' not found among loaded decks",
                raw.core_deck
            ));
        }

        if raw.specials.len() != BattleConfig::SPECIALS_PER_TEMPLATE {
            self.push(format!(
                "{path}.specials must have exactly {} cards (got {})",
                BattleConfig::SPECIALS_PER_TEMPLATE,
                raw.specials.len()
            ));
        }
        let specials = self.cards(&format!("{path}.specials"), "special card", &raw.specials);

        if raw.loot.is_empty() {
            self.push(format!("{path}.loot must have at least one entry"));
        }
        let loot = raw
            .loot
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| self.loot(&format!("{path}.loot[{i}]"), entry))
            .collect();

        if raw.image.as_deref().is_none_or(|img| img.trim().is_empty()) {
            self.push(format!("{path}.image missing/empty"));
        }

        EnemyTemplate {
            id: raw.id.clone(),
            name,
            image: raw.image.clone(),
            hp,
            armor,
            magic_armor,
            base_guard,
            draws,
            movement,
            core_deck: raw.core_deck.clone(),
            specials,
            loot,
        }
    }
}
