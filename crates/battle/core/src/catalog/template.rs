use rand::Rng;

use super::Card;

/// Inclusive integer range that spawn rolls uniformly within.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatRange {
    pub min: u32,
    pub max: u32,
}

impl StatRange {
    pub const ZERO: Self = Self { min: 0, max: 0 };

    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Rolls a value in `[min, max]`. A degenerate range yields `min`.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

/// Kind of a loot-table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LootKind {
    Currency,
    Resource,
    Other,
}

/// One entry of a template's loot table.
///
/// The engine carries loot tables as data only; rolling them is the job of
/// an external roller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: LootKind,
    /// Currency (`cp`/`sp`/`gp`) or resource (`willpower`) name.
    #[cfg_attr(feature = "serde", serde(default, rename = "kind"))]
    pub item: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: Option<String>,
}

/// Immutable enemy archetype that combatants are spawned from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub image: Option<String>,

    pub hp: StatRange,
    pub armor: StatRange,
    pub magic_armor: StatRange,
    pub base_guard: StatRange,

    pub draws: u32,
    pub movement: u32,
    /// Id of the deck shared by every enemy of this kind.
    pub core_deck: String,
    /// Cards unique to this archetype, mixed into the core deck at spawn.
    pub specials: Vec<Card>,
    pub loot: Vec<LootEntry>,
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn rolls_stay_within_inclusive_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let range = StatRange::new(2, 4);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let value = range.roll(&mut rng);
            assert!((2..=4).contains(&value));
            seen[(value - 2) as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn degenerate_range_yields_min() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(StatRange::fixed(7).roll(&mut rng), 7);
        assert_eq!(StatRange::new(5, 1).roll(&mut rng), 5);
    }
}
