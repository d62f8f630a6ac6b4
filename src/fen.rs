//! Structural FEN validation.
//!
//! The delegated engine owns real position semantics; this layer only checks
//! that a FEN string is well-formed before it is handed over, so malformed
//! input surfaces as a typed error instead of engine-defined behavior.

use crate::error::FenError;

/// FEN for the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const PIECE_CHARS: &str = "pnbrqkPNBRQK";

/// Validate the structure of a FEN string.
///
/// Checks field count, piece placement shape, side to move, castling field,
/// en passant square, and the optional move counters. Does not check position
/// legality (piece counts, check state); that remains with the engine.
pub fn validate(fen: &str) -> Result<(), FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(FenError::TooFewFields {
            found: fields.len(),
        });
    }

    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::BadRankCount { found: ranks.len() });
    }
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let mut files = 0usize;
        for c in rank_str.chars() {
            if let Some(d) = c.to_digit(10) {
                files += d as usize;
            } else if PIECE_CHARS.contains(c) {
                files += 1;
            } else {
                return Err(FenError::BadPiece { ch: c });
            }
        }
        if files != 8 {
            return Err(FenError::BadFileCount {
                rank: rank_idx,
                files,
            });
        }
    }

    match fields[1] {
        "w" | "b" => {}
        other => {
            return Err(FenError::BadSideToMove {
                found: other.to_string(),
            })
        }
    }

    for c in fields[2].chars() {
        match c {
            'K' | 'Q' | 'k' | 'q' | '-' => {}
            _ => return Err(FenError::BadCastling { ch: c }),
        }
    }

    if fields[3] != "-" {
        let chars: Vec<char> = fields[3].chars().collect();
        let ok = chars.len() == 2
            && ('a'..='h').contains(&chars[0])
            && ('1'..='8').contains(&chars[1]);
        if !ok {
            return Err(FenError::BadEnPassant {
                found: fields[3].to_string(),
            });
        }
    }

    // Halfmove clock and fullmove number are optional but must be numeric
    for field in fields.iter().skip(4).take(2) {
        if field.parse::<u32>().is_err() {
            return Err(FenError::BadClock {
                found: (*field).to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_is_valid() {
        assert!(validate(START_FEN).is_ok());
    }

    #[test]
    fn test_fen_without_clocks_is_valid() {
        assert!(validate("8/8/8/8/8/8/8/4K2k w - -").is_ok());
    }

    #[test]
    fn test_too_few_fields() {
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenError::TooFewFields { found: 2 })
        );
    }

    #[test]
    fn test_bad_rank_count() {
        assert_eq!(
            validate("8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::BadRankCount { found: 7 })
        );
    }

    #[test]
    fn test_bad_piece_character() {
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1"),
            Err(FenError::BadPiece { ch: 'X' })
        );
    }

    #[test]
    fn test_rank_with_too_many_files() {
        let result = validate("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(
            result,
            Err(FenError::BadFileCount { rank: 1, files: 9 })
        );
    }

    #[test]
    fn test_bad_side_to_move() {
        let result = validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1");
        assert!(matches!(result, Err(FenError::BadSideToMove { .. })));
    }

    #[test]
    fn test_bad_castling_character() {
        let result = validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1");
        assert_eq!(result, Err(FenError::BadCastling { ch: 'x' }));
    }

    #[test]
    fn test_valid_en_passant_square() {
        assert!(validate("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").is_ok());
    }

    #[test]
    fn test_bad_en_passant_square() {
        let result = validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq j9 0 1");
        assert!(matches!(result, Err(FenError::BadEnPassant { .. })));
    }

    #[test]
    fn test_bad_clock_field() {
        let result = validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - abc 1");
        assert!(matches!(result, Err(FenError::BadClock { .. })));
    }
}
