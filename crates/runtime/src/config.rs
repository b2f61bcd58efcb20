//! Runtime configuration sourced from environment variables.
use std::env;
use std::path::PathBuf;

/// Paths and tunables for one runtime instance.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Directory holding `battle.toml`, `decks/` and `enemies/`.
    pub data_dir: PathBuf,
    /// Directory for autosaves and `manual/` saves.
    pub save_dir: PathBuf,
    pub session_id: String,
    /// Overrides the seed from `battle.toml` when set.
    pub seed: Option<u64>,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            save_dir: default_save_dir(),
            session_id: "default".to_owned(),
            seed: None,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_DATA_DIR` - content directory (default: `data`)
    /// - `BATTLE_SAVE_DIR` - save directory (default: platform data dir)
    /// - `BATTLE_SESSION_ID` - autosave key (default: `default`)
    /// - `BATTLE_SEED` - session RNG seed override
    /// - `BATTLE_COMMAND_BUFFER` - command queue capacity (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("BATTLE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("BATTLE_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }
        if let Ok(sid) = env::var("BATTLE_SESSION_ID")
            && !sid.trim().is_empty()
        {
            config.session_id = sid.trim().to_owned();
        }
        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = Some(seed);
        }
        if let Some(size) = read_env::<usize>("BATTLE_COMMAND_BUFFER") {
            config.command_buffer_size = size.max(1);
        }

        config
    }
}

/// Platform data directory for saves.
///
/// - Linux: `~/.local/share/battle-sim/saves`
/// - macOS: `~/Library/Application Support/battle-sim/saves`
/// - Fallback: `./saves`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "battle-sim")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./saves"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
