//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up the command channel, and
//! exposes a builder-based API for clients to drive a battle session.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{Result, RuntimeError, SessionHandle};
use crate::config::RuntimeConfig;
use crate::repository::{SaveRepository, SaveSlot};
use crate::session::BattleSession;
use crate::workers::{Command, SessionWorker};

/// Main runtime that hosts one battle session.
///
/// [`SessionHandle`] provides a cloneable façade for clients.
pub struct SessionRuntime {
    handle: SessionHandle,
    worker_handle: JoinHandle<()>,
}

impl SessionRuntime {
    /// Create a new runtime builder
    pub fn builder() -> SessionRuntimeBuilder {
        SessionRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker drains queued commands and exits once every handle clone
    /// has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`SessionRuntime`].
pub struct SessionRuntimeBuilder {
    config: RuntimeConfig,
    session: Option<BattleSession>,
    repository: Option<Arc<dyn SaveRepository>>,
    restore_current: bool,
}

impl SessionRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            session: None,
            repository: None,
            restore_current: false,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the session the worker will own (required)
    pub fn session(mut self, session: BattleSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Enable autosave and manual saves through this repository
    pub fn repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Resume from the session's autosave slot when one exists
    pub fn restore_current(mut self, restore: bool) -> Self {
        self.restore_current = restore;
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<SessionRuntime> {
        let mut session = self.session.ok_or(RuntimeError::MissingSession)?;

        if self.restore_current
            && let Some(repository) = &self.repository
        {
            let slot = SaveSlot::Current(session.sid().to_owned());
            match repository.load(&slot) {
                Ok(Some(payload)) => {
                    if let Err(error) = session.restore(payload) {
                        tracing::warn!("Ignoring autosave {}: {}", slot, error);
                    }
                }
                Ok(None) => tracing::debug!("No autosave for {}", slot),
                Err(error) => tracing::warn!("Could not read autosave {}: {}", slot, error),
            }
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let handle = SessionHandle::new(command_tx);

        let worker = SessionWorker::new(session, self.repository, command_rx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(SessionRuntime {
            handle,
            worker_handle,
        })
    }
}
