//! Marshaling of façade parameters onto the delegated engine's option surface.

/// Skill level value that disables skill limiting in the delegated engine.
pub const SKILL_DISABLED: i32 = 20;

/// Delegated engine's default contempt, restored for Elo-bounded searches.
pub const DEFAULT_CONTEMPT: i32 = 24;

/// Elo placeholder sent while Elo limiting is disabled.
const ELO_PLACEHOLDER: u32 = 1350;

/// Session-wide engine configuration, applied once at initialization.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Transposition-table size in megabytes
    pub hash_mb: usize,
    /// Maximum number of ranked candidates per search (MultiPV)
    pub max_candidates: u32,
    /// Worker threads for the delegated search
    pub threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            hash_mb: 16,
            max_candidates: 1,
            threads: 1,
        }
    }
}

impl EngineConfig {
    /// Option assignments to apply at session initialization.
    #[must_use]
    pub fn assignments(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Threads", self.threads.max(1).to_string()),
            ("Hash", self.hash_mb.to_string()),
            ("MultiPV", self.max_candidates.max(1).to_string()),
        ]
    }
}

/// Strength policy for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    /// Bound playing strength to an Elo rating; skill limiting disabled.
    Elo(u32),
    /// Bound playing strength by skill level with explicit contempt;
    /// Elo limiting disabled.
    Skill { level: i32, contempt: i32 },
}

/// Per-search option set.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub min_think_ms: u64,
    pub use_own_book: bool,
    pub strength: Strength,
}

impl SearchOptions {
    /// Option assignments to apply before a search, mirroring the delegated
    /// engine's UCI option names.
    #[must_use]
    pub fn assignments(&self) -> Vec<(&'static str, String)> {
        let (limit_strength, elo, skill, contempt) = match self.strength {
            Strength::Elo(elo) => (true, elo, SKILL_DISABLED, DEFAULT_CONTEMPT),
            Strength::Skill { level, contempt } => {
                (false, ELO_PLACEHOLDER, level, contempt)
            }
        };
        vec![
            ("Minimum Thinking Time", self.min_think_ms.to_string()),
            ("UCI_LimitStrength", bool_str(limit_strength).to_string()),
            ("UCI_Elo", elo.to_string()),
            ("Skill Level", skill.to_string()),
            ("Contempt", contempt.to_string()),
            ("OwnBook", bool_str(self.use_own_book).to_string()),
        ]
    }
}

fn bool_str(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}
