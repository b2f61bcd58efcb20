//! Session runtime for the battle engine.
//!
//! This crate wraps the pure engine in a driver: a [`BattleSession`] holding the
//! roster, display order, selection, and the single active-turn pointer; a
//! JSON save repository with atomic writes and `.bak` recovery; and a worker
//! task that applies commands one at a time behind a cloneable
//! [`SessionHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`session`] implements the command semantics
//! - [`repository`] persists session snapshots
//! - [`config`] reads runtime settings from the environment
pub mod api;
pub mod config;
pub mod repository;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{Result, RuntimeError, SessionHandle};
pub use config::RuntimeConfig;
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SavePayload, SaveRepository,
    SaveSlot, UiState,
};
pub use runtime::{SessionRuntime, SessionRuntimeBuilder};
pub use session::{AttackRequest, BattleSession, NextTurn, OrderMove, TurnReport};
