//! Content factory for building a catalog from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use battle_core::{BattleConfig, Catalog, Deck, EnemyTemplate};

use crate::loaders::{ConfigLoader, DeckLoader, EnemyLoader, LoadResult};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── battle.toml      (optional)
/// ├── decks/
/// │   └── basic.json
/// ├── enemies/
/// │   └── goblin.json
/// └── images/
///     └── goblin.png
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `battle.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("battle.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load every deck from `decks/`.
    pub fn load_decks(&self) -> LoadResult<Vec<Deck>> {
        DeckLoader::load_dir(&self.decks_dir())
    }

    /// Load every enemy template from `enemies/`.
    ///
    /// With `strict_images`, each template's image must exist in `images/`.
    pub fn load_enemies(
        &self,
        decks: &[Deck],
        strict_images: bool,
    ) -> LoadResult<Vec<EnemyTemplate>> {
        let images_dir = self.images_dir();
        let images = strict_images.then_some(images_dir.as_path());
        EnemyLoader::load_dir(&self.enemies_dir(), decks, images)
    }

    /// Load decks and templates and assemble them into a [`Catalog`].
    pub fn load_catalog(&self, config: &BattleConfig) -> LoadResult<Catalog> {
        let decks = self.load_decks()?;
        let templates = self.load_enemies(&decks, config.strict_images)?;
        Catalog::from_parts(decks, templates).context("Failed to assemble catalog")
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn decks_dir(&self) -> PathBuf {
        self.data_dir.join("decks")
    }

    pub fn enemies_dir(&self) -> PathBuf {
        self.data_dir.join("enemies")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }
}
