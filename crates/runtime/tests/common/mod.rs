use std::path::PathBuf;
use std::sync::Arc;

use battle_content::ContentFactory;
use battle_core::{BattleConfig, Catalog};
use battle_runtime::BattleSession;

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

/// Catalog assembled from the bundled content files.
pub fn bundled_catalog() -> Arc<Catalog> {
    let factory = ContentFactory::new(data_dir());
    let catalog = factory
        .load_catalog(&BattleConfig::new())
        .expect("bundled content should load");
    Arc::new(catalog)
}

#[allow(dead_code)]
pub fn session(sid: &str, seed: u64) -> BattleSession {
    BattleSession::new(sid, bundled_catalog(), seed)
}
