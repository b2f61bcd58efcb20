//! Worker task that serializes every command against one battle session.
//!
//! The session worker is the only owner of the [`BattleSession`]; clients talk
//! to it through [`crate::SessionHandle`], so commands apply strictly one at a
//! time in arrival order.

mod session;

pub use session::{Command, SessionWorker};
