//! Deck loader.

use std::collections::HashSet;
use std::path::Path;

use battle_core::Deck;

use super::raw::RawDeck;
use super::validate::Report;
use crate::loaders::{LoadResult, file_label, json_files, read_json};

/// Loader for deck definitions from a directory of JSON files.
pub struct DeckLoader;

impl DeckLoader {
    /// Load a single deck file.
    pub fn load_file(path: &Path) -> LoadResult<Deck> {
        let raw: RawDeck = read_json(path)?;
        let mut report = Report::new();
        let deck = report.deck(&format!("Deck({})", file_label(path)), &raw);
        report.finish("Deck", deck)
    }

    /// Load every `*.json` deck in `dir`, in file-name order.
    ///
    /// Fails on the first invalid file, on duplicate deck ids, and when the
    /// directory holds no decks at all.
    pub fn load_dir(dir: &Path) -> LoadResult<Vec<Deck>> {
        let mut seen = HashSet::new();
        let mut decks = Vec::new();

        for path in json_files(dir)? {
            let deck = Self::load_file(&path)?;
            if !seen.insert(deck.id.clone()) {
                anyhow::bail!(
                    "Duplicate deck id '{}' (file {})",
                    deck.id,
                    file_label(&path)
                );
            }
            decks.push(deck);
        }

        if decks.is_empty() {
            anyhow::bail!("No deck json files found in {}", dir.display());
        }
        Ok(decks)
    }
}
