//! Combatant creation from templates, ad-hoc stats, or as inert player entries.
//!
//! Every spawn draws from the caller's generator in a fixed order (stat rolls,
//! then the deck shuffle, then the instance id), so a seeded generator
//! reproduces the same combatant.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::{Card, Catalog, Deck, EnemyTemplate, weighted_pool};
use crate::config::BattleConfig;
use crate::error::{BattleError, ErrorKind};
use crate::state::{CardId, Combatant, DeckState, InstanceId, Statuses};

/// Errors raised while spawning a combatant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("'{owner}' refers to missing deck '{deck}'")]
    MissingDeck { owner: String, deck: String },

    #[error("built deck for '{0}' is empty")]
    EmptyDeck(String),
}

impl BattleError for SpawnError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingDeck { .. } => ErrorKind::IllegalTransition,
            Self::EmptyDeck(_) => ErrorKind::DataIntegrity,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingDeck { .. } => "SPAWN_MISSING_DECK",
            Self::EmptyDeck(_) => "SPAWN_EMPTY_DECK",
        }
    }
}

/// Fixed stats for an enemy built without a template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomEnemy {
    pub name: String,
    pub hp: u32,
    pub armor: u32,
    pub magic_armor: u32,
    pub draws: u32,
    pub movement: u32,
    pub core_deck: String,
}

/// Unshuffled pool of the core deck followed by the specials, each card
/// repeated by its weight.
pub fn build_deck_pool(core: &Deck, specials: &[Card]) -> Result<Vec<CardId>, SpawnError> {
    let pool = weighted_pool(core.cards.iter().chain(specials));
    if pool.is_empty() {
        return Err(SpawnError::EmptyDeck(core.id.clone()));
    }
    Ok(pool)
}

/// Spawns an enemy with stats rolled uniformly inside the template ranges.
///
/// Guard starts at zero; the first turn start raises it to the rolled base.
pub fn spawn_enemy<R: Rng + ?Sized>(
    template: &EnemyTemplate,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Combatant, SpawnError> {
    let core = catalog
        .deck(&template.core_deck)
        .ok_or_else(|| SpawnError::MissingDeck {
            owner: template.id.clone(),
            deck: template.core_deck.clone(),
        })?;

    let hp = template.hp.roll(rng);
    let armor = template.armor.roll(rng);
    let magic_armor = template.magic_armor.roll(rng);
    let guard_base = template.base_guard.roll(rng);

    let mut pool = build_deck_pool(core, &template.specials)?;
    pool.shuffle(rng);

    Ok(Combatant {
        instance_id: InstanceId::random(rng),
        template_id: template.id.clone(),
        name: template.name.clone(),
        image: template.image.clone(),
        hp_current: hp,
        hp_max: hp,
        armor_current: armor,
        armor_max: armor,
        magic_armor_current: magic_armor,
        magic_armor_max: magic_armor,
        guard_base,
        guard_current: 0,
        draws_base: template.draws,
        movement: template.movement,
        statuses: Statuses::empty(),
        deck_state: DeckState::with_draw_pile(pool),
        last_drawn: Vec::new(),
        rolled_loot: None,
        loot_rolled: false,
    })
}

/// Spawns an enemy from fixed stats using only a core deck.
pub fn spawn_custom<R: Rng + ?Sized>(
    custom: &CustomEnemy,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<Combatant, SpawnError> {
    let core = catalog
        .deck(&custom.core_deck)
        .ok_or_else(|| SpawnError::MissingDeck {
            owner: custom.name.clone(),
            deck: custom.core_deck.clone(),
        })?;

    let mut pool = build_deck_pool(core, &[])?;
    pool.shuffle(rng);

    Ok(Combatant {
        instance_id: InstanceId::random(rng),
        template_id: BattleConfig::CUSTOM_TEMPLATE_ID.to_owned(),
        name: custom.name.clone(),
        image: None,
        hp_current: custom.hp,
        hp_max: custom.hp,
        armor_current: custom.armor,
        armor_max: custom.armor,
        magic_armor_current: custom.magic_armor,
        magic_armor_max: custom.magic_armor,
        guard_base: 0,
        guard_current: 0,
        draws_base: custom.draws,
        movement: custom.movement,
        statuses: Statuses::empty(),
        deck_state: DeckState::with_draw_pile(pool),
        last_drawn: Vec::new(),
        rolled_loot: None,
        loot_rolled: false,
    })
}

/// Creates an inert player entry: no stats, no deck.
pub fn spawn_player<R: Rng + ?Sized>(name: impl Into<String>, rng: &mut R) -> Combatant {
    Combatant {
        instance_id: InstanceId::random(rng),
        template_id: BattleConfig::PLAYER_TEMPLATE_ID.to_owned(),
        name: name.into(),
        image: None,
        hp_current: 0,
        hp_max: 0,
        armor_current: 0,
        armor_max: 0,
        magic_armor_current: 0,
        magic_armor_max: 0,
        guard_base: 0,
        guard_current: 0,
        draws_base: 0,
        movement: 0,
        statuses: Statuses::empty(),
        deck_state: DeckState::default(),
        last_drawn: Vec::new(),
        rolled_loot: None,
        loot_rolled: false,
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::catalog::fixtures;

    #[test]
    fn template_spawn_rolls_inside_ranges() {
        let catalog = fixtures::catalog();
        let template = catalog.template("goblin").unwrap();

        for seed in 0..32 {
            let enemy =
                spawn_enemy(template, &catalog, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
            assert!((8..=12).contains(&enemy.hp_max));
            assert!(enemy.armor_max <= 2);
            assert_eq!(enemy.magic_armor_max, 0);
            assert!((1..=2).contains(&enemy.guard_base));
            assert_eq!(enemy.guard_current, 0);
            assert_eq!(enemy.hp_current, enemy.hp_max);
            assert_eq!(enemy.instance_id.as_str().len(), BattleConfig::INSTANCE_ID_LEN);
        }
    }

    #[test]
    fn spawned_pool_holds_core_and_specials_by_weight() {
        let catalog = fixtures::catalog();
        let template = catalog.template("goblin").unwrap();
        let enemy = spawn_enemy(template, &catalog, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();

        let mut spawned: Vec<_> = enemy.deck_state.draw_pile.iter().cloned().collect();
        let mut expected =
            build_deck_pool(catalog.deck("basic").unwrap(), &template.specials).unwrap();
        spawned.sort();
        expected.sort();
        assert_eq!(spawned, expected);
        assert_eq!(expected.len(), 8);
        assert!(enemy.deck_state.hand.is_empty());
    }

    #[test]
    fn same_seed_spawns_identical_enemies() {
        let catalog = fixtures::catalog();
        let template = catalog.template("goblin").unwrap();
        let a = spawn_enemy(template, &catalog, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let b = spawn_enemy(template, &catalog, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pool_order_is_core_then_specials() {
        let pool = build_deck_pool(&fixtures::basic_deck(), &fixtures::goblin().specials).unwrap();
        let ids: Vec<&str> = pool.iter().map(CardId::as_str).collect();
        assert_eq!(
            ids,
            ["strike", "strike", "strike", "brace", "brace", "stab", "shiv", "duck"]
        );
    }

    #[test]
    fn empty_pool_is_rejected() {
        let mut deck = fixtures::basic_deck();
        deck.cards.clear();
        assert_eq!(
            build_deck_pool(&deck, &[]),
            Err(SpawnError::EmptyDeck("basic".into()))
        );
    }

    #[test]
    fn custom_enemy_uses_fixed_stats_and_core_deck() {
        let catalog = fixtures::catalog();
        let custom = CustomEnemy {
            name: "Ogre".into(),
            hp: 20,
            armor: 3,
            magic_armor: 1,
            draws: 1,
            movement: 4,
            core_deck: "basic".into(),
        };

        let enemy = spawn_custom(&custom, &catalog, &mut ChaCha8Rng::seed_from_u64(0)).unwrap();
        assert!(enemy.is_custom());
        assert_eq!((enemy.hp_current, enemy.armor_max, enemy.magic_armor_max), (20, 3, 1));
        assert_eq!(enemy.deck_state.draw_pile.len(), 5);
        assert_eq!(enemy.image, None);
    }

    #[test]
    fn custom_enemy_with_unknown_deck_is_rejected() {
        let custom = CustomEnemy {
            name: "Ogre".into(),
            hp: 20,
            armor: 0,
            magic_armor: 0,
            draws: 1,
            movement: 4,
            core_deck: "missing".into(),
        };
        let err = spawn_custom(&custom, &fixtures::catalog(), &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalTransition);
    }

    #[test]
    fn player_entry_is_inert() {
        let player = spawn_player("Player 1", &mut ChaCha8Rng::seed_from_u64(0));
        assert!(player.is_player());
        assert!(!player.is_down());
        assert_eq!(player.draw_count(), 0);
        assert_eq!(player.deck_state.total_cards(), 0);
    }
}
