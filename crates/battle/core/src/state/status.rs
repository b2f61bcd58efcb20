//! Status effects carried by a combatant.
//!
//! The set of statuses is closed: stacking damage-over-time effects
//! ([`Status::Burn`], [`Status::Poison`]) and single-turn conditions
//! ([`Status::Paralyzed`], [`Status::Slowed`]). A combatant holds at most one
//! entry per [`StatusKind`].
//!
//! # Persisted shape
//!
//! With the `serde` feature, [`Statuses`] serializes as a map from status name
//! to `{"stacks": n}`, e.g. `{"burn": {"stacks": 2}, "slowed": {"stacks": 1}}`.
//! Single-turn conditions always persist with one stack.

use std::fmt;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Names of the recognized statuses.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatusKind {
    /// Damage over time, one point per stack at turn start.
    Burn,
    /// Damage over time, one point per stack at turn start.
    Poison,
    /// Draws one card fewer this turn.
    Paralyzed,
    /// Movement halved (rounded down) this turn.
    Slowed,
}

impl StatusKind {
    /// Stacking statuses accumulate; the others are set to a single stack.
    pub const fn is_stacking(self) -> bool {
        matches!(self, Self::Burn | Self::Poison)
    }

    /// Statuses removed by the end-of-turn hook.
    pub const fn expires_at_turn_end(self) -> bool {
        matches!(self, Self::Paralyzed | Self::Slowed)
    }
}

/// A single active status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Burn { stacks: u32 },
    Poison { stacks: u32 },
    Paralyzed,
    Slowed,
}

impl Status {
    /// Builds a status of the given kind. Single-turn kinds ignore `stacks`.
    pub const fn new(kind: StatusKind, stacks: u32) -> Self {
        match kind {
            StatusKind::Burn => Self::Burn { stacks },
            StatusKind::Poison => Self::Poison { stacks },
            StatusKind::Paralyzed => Self::Paralyzed,
            StatusKind::Slowed => Self::Slowed,
        }
    }

    pub const fn kind(&self) -> StatusKind {
        match self {
            Self::Burn { .. } => StatusKind::Burn,
            Self::Poison { .. } => StatusKind::Poison,
            Self::Paralyzed => StatusKind::Paralyzed,
            Self::Slowed => StatusKind::Slowed,
        }
    }

    /// Stack count; single-turn conditions always report one.
    pub const fn stacks(&self) -> u32 {
        match self {
            Self::Burn { stacks } | Self::Poison { stacks } => *stacks,
            Self::Paralyzed | Self::Slowed => 1,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.stacks())
    }
}

/// Active statuses on a combatant, kept sorted by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statuses {
    entries: ArrayVec<Status, { BattleConfig::MAX_STATUSES }>,
}

impl Statuses {
    /// Creates an empty status set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: StatusKind) -> Option<&Status> {
        self.entries.iter().find(|s| s.kind() == kind)
    }

    pub fn contains(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    /// Stack count of `kind`, zero when absent.
    pub fn stacks(&self, kind: StatusKind) -> u32 {
        self.get(kind).map_or(0, Status::stacks)
    }

    /// Inserts or overwrites the entry for the status's kind.
    pub fn set(&mut self, status: Status) {
        let kind = status.kind();
        match self.entries.binary_search_by_key(&kind, Status::kind) {
            Ok(index) => self.entries[index] = status,
            // One slot per kind, so the insert never overflows.
            Err(index) => self.entries.insert(index, status),
        }
    }

    /// Adds stacks to a stacking status, or sets a single-turn one.
    pub fn add_stacks(&mut self, kind: StatusKind, stacks: u32) {
        if kind.is_stacking() {
            let total = self.stacks(kind).saturating_add(stacks);
            self.set(Status::new(kind, total));
        } else {
            self.set_transient(kind);
        }
    }

    /// Sets `kind` to exactly one stack, overwriting any existing count.
    pub fn set_transient(&mut self, kind: StatusKind) {
        self.set(Status::new(kind, 1));
    }

    /// Removes a status. Returns true if it was present.
    pub fn remove(&mut self, kind: StatusKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.kind() != kind);
        self.entries.len() != before
    }

    /// Total damage-over-time applied at turn start.
    pub fn dot_damage(&self) -> u32 {
        self.stacks(StatusKind::Burn)
            .saturating_add(self.stacks(StatusKind::Poison))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Status> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Statuses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return f.write_str("—");
        }
        for (i, status) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{status}")?;
        }
        Ok(())
    }
}

impl FromIterator<Status> for Statuses {
    fn from_iter<I: IntoIterator<Item = Status>>(iter: I) -> Self {
        let mut statuses = Self::empty();
        for status in iter {
            statuses.set(status);
        }
        statuses
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{Status, StatusKind, Statuses};

    #[derive(Serialize, Deserialize)]
    struct StackRecord {
        stacks: u32,
    }

    impl Serialize for Statuses {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let map: BTreeMap<&str, StackRecord> = self
                .iter()
                .map(|s| {
                    let name: &'static str = s.kind().into();
                    (name, StackRecord { stacks: s.stacks() })
                })
                .collect();
            map.serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Statuses {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let raw = BTreeMap::<String, StackRecord>::deserialize(deserializer)?;
            raw.into_iter()
                .map(|(name, record)| {
                    let kind: StatusKind = name
                        .parse()
                        .map_err(|_| D::Error::custom(format!("unknown status '{name}'")))?;
                    Ok::<_, D::Error>(Status::new(kind, record.stacks))
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::{EnumCount, IntoEnumIterator};

    use super::*;

    #[test]
    fn one_slot_per_kind() {
        assert_eq!(StatusKind::COUNT, BattleConfig::MAX_STATUSES);

        let mut statuses = Statuses::empty();
        for kind in StatusKind::iter() {
            statuses.add_stacks(kind, 2);
            statuses.add_stacks(kind, 2);
        }
        assert_eq!(statuses.len(), StatusKind::COUNT);
    }

    #[test]
    fn stacking_statuses_accumulate() {
        let mut statuses = Statuses::empty();
        statuses.add_stacks(StatusKind::Burn, 1);
        statuses.add_stacks(StatusKind::Burn, 2);
        statuses.add_stacks(StatusKind::Poison, 4);

        assert_eq!(statuses.stacks(StatusKind::Burn), 3);
        assert_eq!(statuses.dot_damage(), 7);
    }

    #[test]
    fn transient_statuses_never_exceed_one_stack() {
        let mut statuses = Statuses::empty();
        statuses.add_stacks(StatusKind::Paralyzed, 5);
        statuses.set_transient(StatusKind::Paralyzed);

        assert_eq!(statuses.stacks(StatusKind::Paralyzed), 1);
        assert_eq!(statuses.get(StatusKind::Paralyzed), Some(&Status::Paralyzed));
    }

    #[test]
    fn entries_stay_sorted_regardless_of_insert_order() {
        let a: Statuses = [Status::Slowed, Status::Burn { stacks: 1 }]
            .into_iter()
            .collect();
        let b: Statuses = [Status::Burn { stacks: 1 }, Status::Slowed]
            .into_iter()
            .collect();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "burn(1), slowed(1)");
    }

    #[test]
    fn remove_reports_presence() {
        let mut statuses = Statuses::empty();
        statuses.set_transient(StatusKind::Slowed);
        assert!(statuses.remove(StatusKind::Slowed));
        assert!(!statuses.remove(StatusKind::Slowed));
        assert_eq!(statuses.to_string(), "—");
    }

    #[test]
    fn names_parse_from_snake_case() {
        assert_eq!("paralyzed".parse::<StatusKind>().ok(), Some(StatusKind::Paralyzed));
        assert!("stunned".parse::<StatusKind>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn persists_as_stack_records() {
        let mut statuses = Statuses::empty();
        statuses.add_stacks(StatusKind::Poison, 2);
        statuses.set_transient(StatusKind::Slowed);

        let json = serde_json::to_value(&statuses).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"poison": {"stacks": 2}, "slowed": {"stacks": 1}})
        );

        let restored: Statuses = serde_json::from_value(json).unwrap();
        assert_eq!(restored, statuses);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rejects_unknown_status_names() {
        let json = serde_json::json!({"stunned": {"stacks": 1}});
        assert!(serde_json::from_value::<Statuses>(json).is_err());
    }
}
