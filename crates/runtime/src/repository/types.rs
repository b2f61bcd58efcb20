//! Persisted session payload.

use std::fmt;

use battle_core::{Combatant, InstanceId};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Selection and active-turn pointer at save time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiState {
    pub selected_id: Option<InstanceId>,
    pub active_turn_id: Option<InstanceId>,
    pub turn_in_progress: bool,
}

/// Full snapshot of one battle session.
///
/// Every combatant round-trips losslessly through this shape; loading does not
/// reinterpret any field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePayload {
    pub version: u32,
    #[serde(default)]
    pub app: String,
    /// UTC timestamp, RFC 3339 with second precision.
    #[serde(default)]
    pub saved_at: String,
    #[serde(default)]
    pub sid: String,
    #[serde(default)]
    pub ui: UiState,
    /// Display order of instance ids.
    #[serde(default)]
    pub order: Vec<InstanceId>,
    #[serde(default)]
    pub enemies: Vec<Combatant>,
}

impl SavePayload {
    pub const VERSION: u32 = 1;
    pub const APP: &'static str = "battle_sim";

    /// Creates a payload stamped with the current time.
    pub fn new(
        sid: impl Into<String>,
        ui: UiState,
        order: Vec<InstanceId>,
        enemies: Vec<Combatant>,
    ) -> Self {
        Self {
            version: Self::VERSION,
            app: Self::APP.to_owned(),
            saved_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            sid: sid.into(),
            ui,
            order,
            enemies,
        }
    }
}

/// Where a payload is stored.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SaveSlot {
    /// Autosave of a running session, keyed by session id.
    Current(String),
    /// Named save made on request.
    Manual(String),
}

impl SaveSlot {
    /// Manual slot named `<sanitized name>_<YYYYmmdd_HHMMSS>`.
    pub fn manual_now(name: &str) -> Self {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        Self::Manual(format!("{}_{stamp}", safe_filename(name)))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Current(sid) | Self::Manual(sid) => sid,
        }
    }

    /// Trailing `YYYYmmdd_HHMMSS` stamp written by [`Self::manual_now`].
    pub fn saved_stamp(&self) -> Option<&str> {
        let Self::Manual(name) = self else {
            return None;
        };
        let (prefix, stamp) = name.split_at_checked(name.len().checked_sub(15)?)?;
        let digits = stamp
            .bytes()
            .enumerate()
            .all(|(i, b)| if i == 8 { b == b'_' } else { b.is_ascii_digit() });
        (prefix.ends_with('_') && digits).then_some(stamp)
    }
}

impl fmt::Display for SaveSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current(sid) => write!(f, "current:{sid}"),
            Self::Manual(name) => write!(f, "manual:{name}"),
        }
    }
}

/// Keeps alphanumerics, `-`, `_` and spaces, then turns spaces into `_`.
///
/// Never returns an empty string.
pub fn safe_filename(name: &str) -> String {
    let kept: String = name
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .collect();
    let cleaned = kept.trim().replace(' ', "_");
    if cleaned.is_empty() {
        "save".to_owned()
    } else {
        cleaned
    }
}
