//! The engine façade: a lock-serialized session over a delegated engine.

use log::{debug, info};
use parking_lot::Mutex;

use crate::backend::{EngineBackend, SearchLimits};
use crate::collect::{CandidateMove, MoveCollector};
use crate::error::EngineError;
use crate::fen;
use crate::options::{EngineConfig, SearchOptions, Strength};

/// A configured session with one delegated engine instance.
///
/// All operations, including the indexed result accessors, serialize through
/// one internal mutex: a search holds the lock for the full configuration +
/// search + drain sequence, so no caller can observe a partially configured
/// engine or a half-drained result set.
pub struct EngineSession {
    inner: Mutex<Inner>,
}

struct Inner {
    backend: Box<dyn EngineBackend>,
    results: Vec<CandidateMove>,
}

impl EngineSession {
    /// Initialize a session over the given backend, applying the session-wide
    /// engine options (threads, hash size, candidate count).
    pub fn initialize(
        mut backend: Box<dyn EngineBackend>,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        for (name, value) in config.assignments() {
            backend.set_option(name, &value)?;
        }
        info!(
            "engine session initialized: hash {} MB, {} candidate(s), {} thread(s)",
            config.hash_mb,
            config.max_candidates.max(1),
            config.threads.max(1)
        );
        Ok(EngineSession {
            inner: Mutex::new(Inner {
                backend,
                results: Vec::new(),
            }),
        })
    }

    /// Load an opening-book binary into the delegated engine. The blob is not
    /// validated here; malformed data behaves however the engine behaves.
    pub fn set_opening_book(&self, book: &[u8]) -> Result<(), EngineError> {
        self.inner.lock().backend.load_book(book)
    }

    /// Search the given position under an Elo-bounded strength policy.
    ///
    /// Returns the number of ranked candidates, or -1 if neither the search
    /// nor the opening-book fallback produced any.
    pub fn generate_moves(
        &self,
        fen: &str,
        min_time_ms: u64,
        max_time_ms: u64,
        elo: u32,
        use_opening_book: bool,
    ) -> Result<i32, EngineError> {
        let options = SearchOptions {
            min_think_ms: min_time_ms,
            use_own_book: use_opening_book,
            strength: Strength::Elo(elo),
        };
        let limits = SearchLimits {
            movetime_ms: max_time_ms,
            depth: None,
        };
        self.run_search(fen, &options, &limits)
    }

    /// Search the given position under a skill-bounded strength policy with
    /// an explicit contempt value and depth bound.
    ///
    /// Same return contract as [`EngineSession::generate_moves`].
    #[allow(clippy::too_many_arguments)]
    pub fn generate_moves_with_skill(
        &self,
        fen: &str,
        min_time_ms: u64,
        max_time_ms: u64,
        skill: i32,
        max_depth: u32,
        contempt: i32,
        use_opening_book: bool,
    ) -> Result<i32, EngineError> {
        let options = SearchOptions {
            min_think_ms: min_time_ms,
            use_own_book: use_opening_book,
            strength: Strength::Skill {
                level: skill,
                contempt,
            },
        };
        let limits = SearchLimits {
            movetime_ms: max_time_ms,
            depth: Some(max_depth),
        };
        self.run_search(fen, &options, &limits)
    }

    fn run_search(
        &self,
        fen: &str,
        options: &SearchOptions,
        limits: &SearchLimits,
    ) -> Result<i32, EngineError> {
        fen::validate(fen)?;

        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        for (name, value) in options.assignments() {
            inner.backend.set_option(name, &value)?;
        }
        inner.backend.set_position(fen)?;
        inner.results.clear();

        let mut collector = MoveCollector::new();
        inner
            .backend
            .search(limits, &mut |report| collector.record(report))?;

        let mut ranked = collector.drain_ranked();
        if ranked.is_empty() && options.use_own_book {
            if let Some(book_move) = inner.backend.root_moves().first() {
                debug!("no search candidates, falling back to book move {book_move}");
                ranked.push(CandidateMove {
                    mv: book_move.clone(),
                    depth: 0,
                    completed_depth: 0,
                    score: 0.0,
                });
            }
        }
        ranked.reverse();

        let count = if ranked.is_empty() {
            -1
        } else {
            ranked.len() as i32
        };
        debug!("search finished with {} candidate(s)", ranked.len());
        inner.results = ranked;
        Ok(count)
    }

    /// Move at `index` in the most recent result set (0 = best), or the empty
    /// string when the index is out of range.
    #[must_use]
    pub fn move_at(&self, index: usize) -> String {
        self.inner
            .lock()
            .results
            .get(index)
            .map(|c| c.mv.clone())
            .unwrap_or_default()
    }

    /// Score of the move at `index`, or 0 when the index is out of range.
    #[must_use]
    pub fn move_score(&self, index: usize) -> f32 {
        self.inner
            .lock()
            .results
            .get(index)
            .map_or(0.0, |c| c.score)
    }

    /// Search depth of the move at `index`, or 0 when out of range.
    #[must_use]
    pub fn move_depth(&self, index: usize) -> i32 {
        self.inner
            .lock()
            .results
            .get(index)
            .map_or(0, |c| c.depth as i32)
    }

    /// Completed (selective) depth of the move at `index`, or 0 when out of
    /// range.
    #[must_use]
    pub fn move_completed_depth(&self, index: usize) -> i32 {
        self.inner
            .lock()
            .results
            .get(index)
            .map_or(0, |c| c.completed_depth as i32)
    }
}
