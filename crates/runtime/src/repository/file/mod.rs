//! File-based save repository.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::api::Result;
use crate::repository::{RepositoryError, SavePayload, SaveRepository, SaveSlot};

/// JSON files under a base directory.
///
/// ```text
/// base_dir/
/// ├── _current_<sid>.json
/// ├── _current_<sid>.json.bak
/// └── manual/
///     └── <name>_<YYYYmmdd_HHMMSS>.json
/// ```
///
/// Writes go to a `.tmp` sibling, are synced, then renamed over the target.
/// The previous file is moved to `.bak` first and serves as a fallback when
/// the main file turns out to be unreadable.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(base_dir.join("manual")).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path of a slot's file.
    pub fn slot_path(&self, slot: &SaveSlot) -> PathBuf {
        match slot {
            SaveSlot::Current(sid) => self.base_dir.join(format!("_current_{sid}.json")),
            SaveSlot::Manual(name) => self.base_dir.join("manual").join(format!("{name}.json")),
        }
    }

    fn sibling(path: &Path, suffix: &str) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
        let temp_path = Self::sibling(path, ".tmp");

        let mut file = File::create(&temp_path).map_err(RepositoryError::Io)?;
        file.write_all(bytes).map_err(RepositoryError::Io)?;
        file.sync_all().map_err(RepositoryError::Io)?;
        drop(file);

        fs::rename(&temp_path, path).map_err(RepositoryError::Io)?;
        Ok(())
    }

    fn read_payload(path: &Path) -> Result<SavePayload> {
        let json = fs::read_to_string(path).map_err(RepositoryError::Io)?;
        let payload =
            serde_json::from_str(&json).map_err(|e| RepositoryError::Json(e.to_string()))?;
        Ok(payload)
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &SaveSlot, payload: &SavePayload) -> Result<()> {
        let path = self.slot_path(slot);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }

        let json = serde_json::to_vec_pretty(payload)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;

        if path.exists()
            && let Err(error) = fs::rename(&path, Self::sibling(&path, ".bak"))
        {
            // A failed backup must not block the new write.
            tracing::warn!("Could not back up {}: {}", path.display(), error);
        }

        Self::write_atomic(&path, &json)?;

        tracing::debug!("Saved {} to {}", slot, path.display());
        Ok(())
    }

    fn load(&self, slot: &SaveSlot) -> Result<Option<SavePayload>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        match Self::read_payload(&path) {
            Ok(payload) => {
                tracing::info!(
                    "Loaded {} with {} combatants",
                    slot,
                    payload.enemies.len()
                );
                Ok(Some(payload))
            }
            Err(primary) => {
                let backup = Self::sibling(&path, ".bak");
                tracing::warn!(
                    "Save {} unreadable ({}), trying {}",
                    path.display(),
                    primary,
                    backup.display()
                );
                match Self::read_payload(&backup) {
                    Ok(payload) => Ok(Some(payload)),
                    Err(fallback) => Err(RepositoryError::CorruptedData(format!(
                        "{}: {primary}; backup: {fallback}",
                        path.display()
                    ))
                    .into()),
                }
            }
        }
    }

    fn delete(&self, slot: &SaveSlot) -> Result<()> {
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::info!("Deleted save: {}", path.display());
        }

        Ok(())
    }

    fn list_manual(&self) -> Result<Vec<SaveSlot>> {
        let dir = self.base_dir.join("manual");
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut saves = Vec::new();
        for entry in fs::read_dir(&dir).map_err(RepositoryError::Io)? {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(name) = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|s| s.strip_suffix(".json"))
            {
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .map_err(RepositoryError::Io)?;
                saves.push((modified, SaveSlot::Manual(name.to_owned())));
            }
        }

        // Newest first; ties broken by name so the order is stable.
        saves.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
        Ok(saves.into_iter().map(|(_, slot)| slot).collect())
    }
}
