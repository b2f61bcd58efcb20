//! Card and effect definitions.

use std::fmt;

use crate::state::CardId;

bitflags::bitflags! {
    /// Modifier tags carried by an attack.
    ///
    /// Parsed from tag strings; unrecognized tags are ignored rather than
    /// rejected.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AttackModifiers: u8 {
        /// Ignore one point of regular reduction (guard first, then armor).
        const STAB = 1 << 0;
        /// Ignore all regular reduction (guard and armor).
        const PIERCE = 1 << 1;
        /// Ignore all magic-armor reduction.
        const MAGIC_PIERCE = 1 << 2;
        /// Destroy one point of armor before mitigation.
        const SUNDER = 1 << 3;
        /// Apply the paralyzed status.
        const PARALYSE = 1 << 4;
    }
}

impl AttackModifiers {
    const TAGS: [(&'static str, Self); 5] = [
        ("stab", Self::STAB),
        ("pierce", Self::PIERCE),
        ("magic_pierce", Self::MAGIC_PIERCE),
        ("sunder", Self::SUNDER),
        ("paralyse", Self::PARALYSE),
    ];

    /// Looks up a single tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::TAGS
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, flag)| *flag)
    }

    /// Collects every recognized tag, silently skipping the rest.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .filter_map(|tag| Self::from_tag(tag.as_ref()))
            .fold(Self::empty(), |acc, flag| acc | flag)
    }

    /// Tag names of the set modifiers, in canonical order.
    pub fn tags(self) -> impl Iterator<Item = &'static str> {
        Self::TAGS
            .into_iter()
            .filter(move |(_, flag)| self.contains(*flag))
            .map(|(name, _)| name)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AttackModifiers {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.tags())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AttackModifiers {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tags = <Vec<String> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::from_tags(tags))
    }
}

/// A single effect printed on a card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Effect {
    Attack {
        amount: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        modifiers: AttackModifiers,
    },
    Guard {
        amount: u32,
    },
}

impl Effect {
    pub fn amount(&self) -> u32 {
        match self {
            Self::Attack { amount, .. } | Self::Guard { amount } => *amount,
        }
    }

    /// Guard granted by this effect, if it is a guard effect.
    pub fn guard_amount(&self) -> Option<u32> {
        match self {
            Self::Guard { amount } => Some(*amount),
            Self::Attack { .. } => None,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack { amount, modifiers } if modifiers.is_empty() => {
                write!(f, "Attack {amount}")
            }
            Self::Attack { amount, modifiers } => {
                let tags: Vec<&str> = modifiers.tags().collect();
                write!(f, "Attack {amount} ({})", tags.join(", "))
            }
            Self::Guard { amount } => write!(f, "Guard {amount}"),
        }
    }
}

/// Immutable card definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: CardId,
    pub title: String,
    /// Copies of this card placed in a built deck pool.
    pub weight: u32,
    pub effects: Vec<Effect>,
}

impl Card {
    /// Human-readable summary, e.g. `Attack 3 (stab) + Guard 2`.
    ///
    /// Falls back to the title for a card without effects.
    pub fn effect_text(&self) -> String {
        if self.effects.is_empty() {
            return self.title.clone();
        }
        self.effects
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Sum of all guard effects on this card.
    pub fn guard_total(&self) -> u32 {
        self.effects
            .iter()
            .filter_map(Effect::guard_amount)
            .fold(0, u32::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_are_ignored() {
        let mods = AttackModifiers::from_tags(["stab", "bogus", "sunder"]);
        assert_eq!(mods, AttackModifiers::STAB | AttackModifiers::SUNDER);
        assert_eq!(mods.tags().collect::<Vec<_>>(), ["stab", "sunder"]);
    }

    #[test]
    fn effect_text_lists_modifiers() {
        let card = Card {
            id: CardId::from("slash"),
            title: "Slash".into(),
            weight: 1,
            effects: vec![
                Effect::Attack {
                    amount: 3,
                    modifiers: AttackModifiers::STAB | AttackModifiers::PIERCE,
                },
                Effect::Guard { amount: 2 },
            ],
        };
        assert_eq!(card.effect_text(), "Attack 3 (stab, pierce) + Guard 2");
        assert_eq!(card.guard_total(), 2);
    }

    #[test]
    fn card_without_effects_shows_title() {
        let card = Card {
            id: CardId::from("blank"),
            title: "Blank".into(),
            weight: 1,
            effects: Vec::new(),
        };
        assert_eq!(card.effect_text(), "Blank");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn effects_use_a_type_tag() {
        let effect: Effect = serde_json::from_value(serde_json::json!({
            "type": "attack",
            "amount": 4,
            "modifiers": ["magic_pierce", "whatever"]
        }))
        .unwrap();
        assert_eq!(
            effect,
            Effect::Attack {
                amount: 4,
                modifiers: AttackModifiers::MAGIC_PIERCE
            }
        );

        let block = serde_json::json!({"type": "block", "amount": 1});
        assert!(serde_json::from_value::<Effect>(block).is_err());
    }
}
