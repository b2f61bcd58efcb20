//! Repository contract for saving and loading battle sessions.

use crate::api::Result;
use crate::repository::{SavePayload, SaveSlot};

/// Storage for session snapshots.
///
/// Implementations must make `save` atomic: a reader never observes a
/// half-written payload.
pub trait SaveRepository: Send + Sync {
    /// Store a payload, replacing whatever the slot held.
    fn save(&self, slot: &SaveSlot, payload: &SavePayload) -> Result<()>;

    /// Load a payload. Returns `None` when the slot was never written.
    fn load(&self, slot: &SaveSlot) -> Result<Option<SavePayload>>;

    /// Delete a slot. Deleting a missing slot is not an error.
    fn delete(&self, slot: &SaveSlot) -> Result<()>;

    /// Manual saves, newest first.
    fn list_manual(&self) -> Result<Vec<SaveSlot>>;
}
