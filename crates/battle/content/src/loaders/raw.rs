//! On-disk record shapes.
//!
//! Numeric fields are read as `i64` so that out-of-range values surface as
//! validation messages instead of opaque parse errors.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawEffect {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: i64,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawCard {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_weight")]
    pub weight: i64,
    pub effects: Vec<RawEffect>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDeck {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub cards: Vec<RawCard>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub(crate) struct RawRange {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawLoot {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, rename = "kind")]
    pub item: Option<String>,
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEnemy {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub hp: RawRange,
    pub armor: RawRange,
    #[serde(default)]
    pub magic_armor: RawRange,
    #[serde(default)]
    pub base_guard: RawRange,
    #[serde(default = "default_draws")]
    pub draws: i64,
    #[serde(default)]
    pub movement: i64,
    pub core_deck: String,
    pub specials: Vec<RawCard>,
    #[serde(default)]
    pub loot: Vec<RawLoot>,
}

fn default_weight() -> i64 {
    1
}

fn default_draws() -> i64 {
    1
}
