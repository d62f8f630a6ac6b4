//! The delegated-engine capability surface.
//!
//! Everything hard about chess lives behind [`EngineBackend`]: option
//! configuration, position setup, the search itself, and book lookup. The
//! façade only marshals parameters in and collects move reports out.

mod uci;

pub use uci::UciBackend;

use crate::error::EngineError;

/// One move-found report emitted by the delegated engine during search.
#[derive(Debug, Clone)]
pub struct MoveReport {
    /// Move in UCI notation
    pub mv: String,
    /// Iteration depth of the report
    pub depth: u32,
    /// Selective depth reached for this line
    pub seldepth: u32,
    /// Score in centipawns from the side to move
    pub score_cp: i32,
}

/// Limits for one search call.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    /// Wall-clock bound in milliseconds
    pub movetime_ms: u64,
    /// Optional depth bound (None = unlimited)
    pub depth: Option<u32>,
}

/// Opaque handle to a delegated chess engine.
///
/// Implementations must run [`EngineBackend::search`] synchronously: every
/// `on_move` invocation happens before the call returns, which is what lets
/// the façade hand results back without further synchronization.
pub trait EngineBackend: Send {
    /// Set a global engine option by name.
    fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError>;

    /// Load an opening-book binary blob. The book format is engine-defined;
    /// no validation happens at this layer.
    fn load_book(&mut self, book: &[u8]) -> Result<(), EngineError>;

    /// Set the current position from a FEN string (already validated by the
    /// façade; engine behavior on semantically illegal positions is its own).
    fn set_position(&mut self, fen: &str) -> Result<(), EngineError>;

    /// Run a search, blocking until the engine signals completion. Invokes
    /// `on_move` for each candidate the engine reports along the way.
    fn search(
        &mut self,
        limits: &SearchLimits,
        on_move: &mut dyn FnMut(MoveReport),
    ) -> Result<(), EngineError>;

    /// Root moves known after the last search, best first. Used for the
    /// opening-book fallback when the search reported no candidates.
    fn root_moves(&self) -> &[String];
}
