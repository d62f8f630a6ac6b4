//! Subprocess adapter for UCI-speaking engines.
//!
//! Drives an external engine binary over piped stdin/stdout: `setoption`
//! writes for configuration, `position fen` + `go` for search, `info` lines
//! as the move-found callback, and `bestmove` as the search-finished signal.
//! The engine's output stream is consumed here, so nothing the engine prints
//! reaches the host process's stdout.

use std::ffi::OsStr;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace, warn};

use super::{EngineBackend, MoveReport, SearchLimits};
use crate::error::EngineError;

/// Centipawn bound used to fold `score mate N` onto the centipawn scale
/// while keeping nearer mates ranked higher.
const MATE_BOUND: i32 = 32_000;

static BOOK_FILE_SEQ: AtomicU64 = AtomicU64::new(0);

/// A delegated engine running as a UCI subprocess.
pub struct UciBackend {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
    root_moves: Vec<String>,
    book_path: Option<PathBuf>,
}

impl UciBackend {
    /// Spawn an engine binary and complete the `uci`/`uciok` handshake.
    pub fn spawn<P: AsRef<OsStr>>(program: P) -> Result<Self, EngineError> {
        let mut child = Command::new(&program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child.stdin.take().ok_or_else(|| EngineError::Backend {
            message: "engine stdin unavailable".to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| EngineError::Backend {
            message: "engine stdout unavailable".to_string(),
        })?;

        let mut backend = UciBackend {
            child,
            stdin,
            reader: BufReader::new(stdout),
            root_moves: Vec::new(),
            book_path: None,
        };

        backend.send("uci")?;
        backend.read_until("uciok")?;
        backend.wait_ready()?;
        debug!("engine handshake complete: {:?}", program.as_ref());
        Ok(backend)
    }

    fn send(&mut self, line: &str) -> Result<(), EngineError> {
        trace!("-> {line}");
        writeln!(self.stdin, "{line}")?;
        self.stdin.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, EngineError> {
        let mut line = String::new();
        let bytes = self.reader.read_line(&mut line)?;
        if bytes == 0 {
            return Err(EngineError::Backend {
                message: "engine terminated unexpectedly".to_string(),
            });
        }
        let line = line.trim_end().to_string();
        trace!("<- {line}");
        Ok(line)
    }

    fn read_until(&mut self, marker: &str) -> Result<(), EngineError> {
        loop {
            let line = self.read_line()?;
            if line.trim() == marker {
                return Ok(());
            }
        }
    }

    /// Synchronize with the engine via `isready`/`readyok`.
    fn wait_ready(&mut self) -> Result<(), EngineError> {
        self.send("isready")?;
        self.read_until("readyok")
    }
}

impl EngineBackend for UciBackend {
    fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        self.send(&format!("setoption name {name} value {value}"))
    }

    fn load_book(&mut self, book: &[u8]) -> Result<(), EngineError> {
        let seq = BOOK_FILE_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "uci_bridge_book_{}_{}.bin",
            std::process::id(),
            seq
        ));
        fs::write(&path, book)?;
        debug!("opening book staged at {}", path.display());
        let path_str = path.to_string_lossy().into_owned();
        self.book_path = Some(path);
        self.set_option("BookFile", &path_str)?;
        self.wait_ready()
    }

    fn set_position(&mut self, fen: &str) -> Result<(), EngineError> {
        self.send(&format!("position fen {fen}"))
    }

    fn search(
        &mut self,
        limits: &SearchLimits,
        on_move: &mut dyn FnMut(MoveReport),
    ) -> Result<(), EngineError> {
        self.wait_ready()?;
        self.send(&go_command(limits))?;
        self.root_moves.clear();
        loop {
            let line = self.read_line()?;
            if let Some(report) = parse_info_line(&line) {
                on_move(report);
                continue;
            }
            if let Some(rest) = line.strip_prefix("bestmove") {
                if let Some(mv) = rest.split_whitespace().next() {
                    if mv != "(none)" && mv != "0000" {
                        self.root_moves.push(mv.to_string());
                    }
                }
                return Ok(());
            }
        }
    }

    fn root_moves(&self) -> &[String] {
        &self.root_moves
    }
}

impl Drop for UciBackend {
    fn drop(&mut self) {
        if self.send("quit").is_err() {
            warn!("engine did not accept quit, killing process");
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
        if let Some(path) = self.book_path.take() {
            let _ = fs::remove_file(path);
        }
    }
}

fn go_command(limits: &SearchLimits) -> String {
    match limits.depth {
        Some(depth) => format!("go movetime {} depth {depth}", limits.movetime_ms),
        None => format!("go movetime {}", limits.movetime_ms),
    }
}

/// Parse one `info` line into a move report.
///
/// Returns `None` for lines that carry no ranked candidate (e.g.
/// `info string ...`, currmove updates, or lines without a pv).
fn parse_info_line(line: &str) -> Option<MoveReport> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("info") {
        return None;
    }

    let mut depth: Option<u32> = None;
    let mut seldepth: Option<u32> = None;
    let mut score_cp: Option<i32> = None;
    let mut mv: Option<String> = None;

    while let Some(token) = tokens.next() {
        match token {
            "depth" => depth = tokens.next().and_then(|v| v.parse().ok()),
            "seldepth" => seldepth = tokens.next().and_then(|v| v.parse().ok()),
            "score" => match tokens.next() {
                Some("cp") => {
                    score_cp = tokens.next().and_then(|v| v.parse().ok());
                }
                Some("mate") => {
                    score_cp = tokens
                        .next()
                        .and_then(|v| v.parse::<i32>().ok())
                        .map(fold_mate_score);
                }
                _ => return None,
            },
            "pv" => {
                mv = tokens.next().map(str::to_string);
                break;
            }
            "string" => return None,
            _ => {}
        }
    }

    let depth = depth?;
    Some(MoveReport {
        mv: mv?,
        depth,
        seldepth: seldepth.unwrap_or(depth),
        score_cp: score_cp?,
    })
}

fn fold_mate_score(mate_in: i32) -> i32 {
    if mate_in >= 0 {
        MATE_BOUND - mate_in
    } else {
        -MATE_BOUND - mate_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_info_line() {
        let line = "info depth 10 seldepth 13 multipv 1 score cp 34 nodes 12345 nps 100000 time 120 pv e2e4 e7e5";
        let report = parse_info_line(line).unwrap();
        assert_eq!(report.mv, "e2e4");
        assert_eq!(report.depth, 10);
        assert_eq!(report.seldepth, 13);
        assert_eq!(report.score_cp, 34);
    }

    #[test]
    fn test_parse_mate_score_positive() {
        let line = "info depth 8 seldepth 8 score mate 3 pv d1h5";
        let report = parse_info_line(line).unwrap();
        assert_eq!(report.score_cp, MATE_BOUND - 3);
    }

    #[test]
    fn test_parse_mate_score_negative() {
        let line = "info depth 8 score mate -2 pv h7h6";
        let report = parse_info_line(line).unwrap();
        assert_eq!(report.score_cp, -MATE_BOUND + 2);
        // seldepth defaults to depth when the engine omits it
        assert_eq!(report.seldepth, 8);
    }

    #[test]
    fn test_nearer_mate_ranks_higher() {
        assert!(fold_mate_score(1) > fold_mate_score(5));
        assert!(fold_mate_score(-1) < fold_mate_score(-5));
        assert!(fold_mate_score(5) > 30_000);
    }

    #[test]
    fn test_info_string_line_is_ignored() {
        assert!(parse_info_line("info string NNUE evaluation enabled").is_none());
    }

    #[test]
    fn test_currmove_line_without_pv_is_ignored() {
        assert!(parse_info_line("info depth 12 currmove e2e4 currmovenumber 1").is_none());
    }

    #[test]
    fn test_non_info_line_is_ignored() {
        assert!(parse_info_line("bestmove e2e4 ponder e7e5").is_none());
    }

    #[test]
    fn test_go_command_without_depth() {
        let limits = SearchLimits {
            movetime_ms: 1000,
            depth: None,
        };
        assert_eq!(go_command(&limits), "go movetime 1000");
    }

    #[test]
    fn test_go_command_with_depth() {
        let limits = SearchLimits {
            movetime_ms: 500,
            depth: Some(10),
        };
        assert_eq!(go_command(&limits), "go movetime 500 depth 10");
    }
}
