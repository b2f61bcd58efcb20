//! Persistence for battle sessions.
//!
//! [`SavePayload`] is the persisted shape; [`SaveRepository`] stores it in
//! named slots. The file implementation writes JSON atomically and keeps the
//! previous file as a `.bak` fallback.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::RepositoryError;
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
pub use types::{SavePayload, SaveSlot, UiState, safe_filename};
