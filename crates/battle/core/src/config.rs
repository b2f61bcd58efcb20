/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Seed for the session generator. Identical seeds replay identical
    /// spawns, shuffles and draws.
    pub seed: u64,
    /// When true, template images must exist on disk at load time.
    pub strict_images: bool,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per recognized status kind.
    pub const MAX_STATUSES: usize = 4;

    // ===== rules constants =====
    /// Guard has no declared maximum; heals clamp to this sentinel instead.
    pub const GUARD_CEILING: u32 = 9999;
    /// Every enemy template carries exactly this many special cards.
    pub const SPECIALS_PER_TEMPLATE: usize = 3;
    /// Length of generated instance ids (lowercase hex).
    pub const INSTANCE_ID_LEN: usize = 10;

    /// Reserved template id for roster entries without combat stats.
    pub const PLAYER_TEMPLATE_ID: &'static str = "player";
    /// Template id for enemies built from ad-hoc stats instead of a template.
    pub const CUSTOM_TEMPLATE_ID: &'static str = "custom";

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 1;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            strict_images: false,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
