//! A synchronous request/response façade over a delegated chess engine.
//!
//! Search, evaluation, opening books, and transposition tables all live in
//! the delegated engine behind [`EngineBackend`]. This crate owns the session
//! contract around it: option marshaling, serialized search calls, and ranked
//! candidate-move results.
//!
//! ```no_run
//! use uci_bridge::{EngineConfig, EngineSession, UciBackend};
//!
//! # fn main() -> Result<(), uci_bridge::EngineError> {
//! let backend = UciBackend::spawn("stockfish")?;
//! let config = EngineConfig { hash_mb: 16, max_candidates: 6, threads: 1 };
//! let session = EngineSession::initialize(Box::new(backend), &config)?;
//!
//! let count = session.generate_moves(uci_bridge::fen::START_FEN, 1000, 1000, 1200, false)?;
//! for i in 0..count.max(0) as usize {
//!     println!("{} {}", session.move_at(i), session.move_score(i));
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod collect;
pub mod error;
pub mod fen;
pub mod options;
pub mod session;

pub use backend::{EngineBackend, MoveReport, SearchLimits, UciBackend};
pub use collect::CandidateMove;
pub use error::{EngineError, FenError};
pub use options::{EngineConfig, SearchOptions, Strength};
pub use session::EngineSession;
