//! Error types for the engine façade.

use std::fmt;
use std::io;

/// Error type for FEN validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    TooFewFields { found: usize },
    /// Piece placement has the wrong number of ranks
    BadRankCount { found: usize },
    /// Invalid piece character in the placement field
    BadPiece { ch: char },
    /// A rank describes the wrong number of files
    BadFileCount { rank: usize, files: usize },
    /// Invalid side to move (must be 'w' or 'b')
    BadSideToMove { found: String },
    /// Invalid castling character
    BadCastling { ch: char },
    /// Invalid en passant square
    BadEnPassant { found: String },
    /// Move counter field is not a number
    BadClock { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewFields { found } => {
                write!(f, "FEN must have at least 4 fields, found {found}")
            }
            FenError::BadRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::BadPiece { ch } => {
                write!(f, "Invalid piece character '{ch}' in FEN")
            }
            FenError::BadFileCount { rank, files } => {
                write!(f, "Rank {rank} describes {files} files, expected 8")
            }
            FenError::BadSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::BadCastling { ch } => {
                write!(f, "Invalid castling character '{ch}' in FEN")
            }
            FenError::BadEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::BadClock { found } => {
                write!(f, "Invalid move counter '{found}' in FEN")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for façade and backend failures.
#[derive(Debug)]
pub enum EngineError {
    /// The FEN string failed structural validation
    InvalidFen(FenError),
    /// I/O failure talking to the delegated engine
    Io(io::Error),
    /// The delegated engine sent something the adapter cannot interpret
    Protocol { line: String },
    /// The delegated engine reported or caused a failure
    Backend { message: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidFen(err) => write!(f, "Invalid FEN: {err}"),
            EngineError::Io(err) => write!(f, "Engine I/O failure: {err}"),
            EngineError::Protocol { line } => {
                write!(f, "Unexpected engine output: '{line}'")
            }
            EngineError::Backend { message } => write!(f, "Engine failure: {message}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidFen(err) => Some(err),
            EngineError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FenError> for EngineError {
    fn from(err: FenError) -> Self {
        EngineError::InvalidFen(err)
    }
}

impl From<io::Error> for EngineError {
    fn from(err: io::Error) -> Self {
        EngineError::Io(err)
    }
}
