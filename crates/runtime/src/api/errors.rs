//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the battle engine, the session's turn bookkeeping,
//! repositories, and worker coordination so clients can bubble them up with
//! consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::{BattleError, CombatError, ErrorKind, InstanceId, RosterError, SpawnError};

pub use crate::repository::RepositoryError;
use crate::repository::SaveSlot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no combatant is selected")]
    NoSelection,

    #[error("'{0}' does not hold the active turn")]
    NotActive(InstanceId),

    #[error("'{active}' holds the active turn; end that turn first")]
    AnotherTurnActive { active: InstanceId },

    #[error("'{0}' already started its turn")]
    TurnAlreadyStarted(InstanceId),

    #[error("'{0}' has not drawn this turn")]
    TurnNotInProgress(InstanceId),

    #[error("player '{0}' takes no enemy turn")]
    PlayerHasNoTurn(InstanceId),

    #[error("player '{0}' has no combat stats")]
    PlayerHasNoStats(InstanceId),

    #[error("unknown enemy template '{0}'")]
    UnknownTemplate(String),

    #[error("custom enemy '{0}' has no template loot")]
    CustomHasNoLoot(InstanceId),

    #[error(transparent)]
    Combat(#[from] CombatError),


    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no save found in {0}")]
    SaveNotFound(SaveSlot),

    #[error("no save repository configured")]
    NoRepository,

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a session before building")]
    MissingSession,
}

impl RuntimeError {
    /// Engine-level classification, or `None` for infrastructure failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::NoSelection
            | Self::NotActive(_)
            | Self::AnotherTurnActive { .. }
            | Self::TurnAlreadyStarted(_)
            | Self::TurnNotInProgress(_)
            | Self::PlayerHasNoTurn(_)
            | Self::PlayerHasNoStats(_)
            | Self::UnknownTemplate(_)
            | Self::CustomHasNoLoot(_) => Some(ErrorKind::IllegalTransition),
            Self::Combat(e) => Some(e.kind()),
            Self::Spawn(e) => Some(e.kind()),
            Self::Roster(e) => Some(e.kind()),
            Self::Repository(RepositoryError::CorruptedData(_)) => Some(ErrorKind::DataIntegrity),
            Self::Repository(_)
            | Self::SaveNotFound(_)
            | Self::NoRepository
            | Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_)
            | Self::MissingSession => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_keep_their_kind() {
        let err = RuntimeError::from(CombatError::NegativeDamage(-1));
        assert_eq!(err.kind(), Some(ErrorKind::InvalidArgument));
        assert_eq!(err.to_string(), "damage must be >= 0 (got -1)");

        let err = RuntimeError::AnotherTurnActive {
            active: InstanceId::from("abc"),
        };
        assert_eq!(err.kind(), Some(ErrorKind::IllegalTransition));
    }

    #[test]
    fn channel_failures_are_unclassified() {
        assert_eq!(RuntimeError::CommandChannelClosed.kind(), None);
    }
}
