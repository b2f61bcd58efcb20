//! In-memory save repository implementation.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::api::Result;
use crate::repository::{RepositoryError, SavePayload, SaveRepository, SaveSlot};

/// In-memory save repository for testing and development.
///
/// Thread-safe but not persistent across process restarts.
#[derive(Default)]
pub struct InMemorySaveRepository {
    slots: RwLock<BTreeMap<SaveSlot, SavePayload>>,
}

impl InMemorySaveRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &SaveSlot, payload: &SavePayload) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        slots.insert(slot.clone(), payload.clone());
        Ok(())
    }

    fn load(&self, slot: &SaveSlot) -> Result<Option<SavePayload>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(slots.get(slot).cloned())
    }

    fn delete(&self, slot: &SaveSlot) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        slots.remove(slot);
        Ok(())
    }

    fn list_manual(&self) -> Result<Vec<SaveSlot>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut manual: Vec<SaveSlot> = slots
            .keys()
            .filter(|slot| matches!(slot, SaveSlot::Manual(_)))
            .cloned()
            .collect();

        // Newest stamp first; unstamped names last, ties broken by name.
        manual.sort_by(|a, b| {
            b.saved_stamp()
                .cmp(&a.saved_stamp())
                .then_with(|| b.cmp(a))
        });
        Ok(manual)
    }
}
