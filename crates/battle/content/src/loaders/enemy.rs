//! Enemy template loader.

use std::collections::HashSet;
use std::path::Path;

use battle_core::{Deck, EnemyTemplate};

use super::raw::RawEnemy;
use super::validate::Report;
use crate::loaders::{LoadResult, file_label, json_files, read_json};

/// Loader for enemy templates from a directory of JSON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load a single template file, checking its core deck against `decks`.
    ///
    /// With `images_dir` set, the template's image must exist in it.
    pub fn load_file(
        path: &Path,
        decks: &HashSet<String>,
        images_dir: Option<&Path>,
    ) -> LoadResult<EnemyTemplate> {
        let raw: RawEnemy = read_json(path)?;
        let label = format!("Enemy({})", file_label(path));

        let mut report = Report::new();
        let template = report.enemy(&label, &raw, decks);

        if let (Some(dir), Some(image)) = (images_dir, template.image.as_deref()) {
            let image_path = dir.join(image);
            if !image.trim().is_empty() && !image_path.exists() {
                report.push(format!(
                    "{label}.image file not found: {}",
                    image_path.display()
                ));
            }
        }

        report.finish("Enemy", template)
    }

    /// Load every `*.json` template in `dir`, in file-name order.
    pub fn load_dir(
        dir: &Path,
        decks: &[Deck],
        images_dir: Option<&Path>,
    ) -> LoadResult<Vec<EnemyTemplate>> {
        let deck_ids: HashSet<String> = decks.iter().map(|d| d.id.clone()).collect();
        let mut seen = HashSet::new();
        let mut templates = Vec::new();

        for path in json_files(dir)? {
            let template = Self::load_file(&path, &deck_ids, images_dir)?;
            if !seen.insert(template.id.clone()) {
                anyhow::bail!(
                    "Duplicate enemy id '{}' (file {})",
                    template.id,
                    file_label(&path)
                );
            }
            templates.push(template);
        }

        if templates.is_empty() {
            anyhow::bail!("No enemy json files found in {}", dir.display());
        }
        Ok(templates)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use battle_core::{LootKind, StatRange};

    use super::*;

    const GOBLIN: &str = r#"{
        "id": "goblin",
        "name": "Goblin",
        "image": "goblin.png",
        "hp": { "min": 8, "max": 12 },
        "armor": { "min": 0, "max": 1 },
        "baseGuard": { "min": 1, "max": 2 },
        "draws": 2,
        "movement": 6,
        "coreDeck": "basic",
        "specials": [
            { "id": "stab", "effects": [{ "type": "attack", "amount": 3, "modifiers": ["stab"] }] },
            { "id": "shiv", "effects": [{ "type": "attack", "amount": 1, "modifiers": ["paralyse"] }] },
            { "id": "duck", "effects": [{ "type": "guard", "amount": 3 }] }
        ],
        "loot": [{ "type": "currency", "kind": "cp", "min": 1, "max": 6 }]
    }"#;

    fn decks() -> HashSet<String> {
        HashSet::from(["basic".to_owned()])
    }

    #[test]
    fn reads_camel_case_keys_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goblin.json");
        fs::write(&path, GOBLIN).unwrap();

        let template = EnemyLoader::load_file(&path, &decks(), None).unwrap();
        assert_eq!(template.core_deck, "basic");
        assert_eq!(template.base_guard, StatRange::new(1, 2));
        assert_eq!(template.magic_armor, StatRange::ZERO);
        assert_eq!(template.loot[0].kind, LootKind::Currency);
        assert_eq!(template.loot[0].item.as_deref(), Some("cp"));
    }

    #[test]
    fn missing_image_fails_only_when_checked() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("images");
        fs::create_dir(&images).unwrap();
        let path = dir.path().join("goblin.json");
        fs::write(&path, GOBLIN).unwrap();

        assert!(EnemyLoader::load_file(&path, &decks(), None).is_ok());

        let err = EnemyLoader::load_file(&path, &decks(), Some(&images))
            .unwrap_err()
            .to_string();
        assert!(err.contains("image file not found"));

        fs::write(images.join("goblin.png"), b"png").unwrap();
        assert!(EnemyLoader::load_file(&path, &decks(), Some(&images)).is_ok());
    }

    #[test]
    fn unknown_core_deck_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goblin.json");
        fs::write(&path, GOBLIN).unwrap();

        let err = EnemyLoader::load_file(&path, &HashSet::new(), None)
            .unwrap_err()
            .to_string();
        assert!(err.contains("Enemy(goblin.json).coreDeck 'basic' not found"));
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = EnemyLoader::load_file(&path, &decks(), None)
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("Failed to parse JSON"));
        assert!(err.contains("broken.json"));
    }
}
