//! Data-driven battle content and its loaders.
//!
//! Static content lives in a data directory and is read once per session:
//! - Decks (JSON, one file per deck)
//! - Enemy templates (JSON, one file per archetype)
//! - Battle configuration (TOML)
//!
//! Files use camelCase keys. Loaders validate every record, report all
//! problems of a file at once, and hand back `battle-core` types ready to be
//! assembled into a [`battle_core::Catalog`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, DeckLoader, EnemyLoader, LoadResult};
