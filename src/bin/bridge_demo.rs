use std::env;
use std::fs;

use uci_bridge::{fen, EngineConfig, EngineSession, UciBackend};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        eprintln!("usage: bridge_demo <engine-binary> [opening-book.bin]");
        return;
    }

    let backend = match UciBackend::spawn(&args[1]) {
        Ok(b) => b,
        Err(err) => {
            eprintln!("failed to start engine '{}': {err}", args[1]);
            return;
        }
    };

    let config = EngineConfig {
        hash_mb: 16,
        max_candidates: 6,
        threads: 1,
    };
    let session = match EngineSession::initialize(Box::new(backend), &config) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("initialization failed: {err}");
            return;
        }
    };

    let have_book = if let Some(book_path) = args.get(2) {
        match fs::read(book_path) {
            Ok(bytes) => match session.set_opening_book(&bytes) {
                Ok(()) => true,
                Err(err) => {
                    eprintln!("could not load opening book: {err}");
                    false
                }
            },
            Err(err) => {
                eprintln!("could not read '{book_path}': {err}");
                false
            }
        }
    } else {
        false
    };

    for round in 0..4 {
        let use_book = have_book && round % 2 > 0;
        let label = if round >= 2 { "skill" } else { "elo" };
        println!("generating moves ({label}, book: {use_book})");

        let count = if round >= 2 {
            session.generate_moves_with_skill(fen::START_FEN, 1000, 1000, 5, 10, 50, use_book)
        } else {
            session.generate_moves(fen::START_FEN, 1000, 1000, 1200, use_book)
        };

        match count {
            Ok(count) => {
                for i in 0..count.max(0) as usize {
                    println!(
                        "  {} depth {} seldepth {} score {}",
                        session.move_at(i),
                        session.move_depth(i),
                        session.move_completed_depth(i),
                        session.move_score(i)
                    );
                }
                if count < 0 {
                    println!("  no candidates");
                }
            }
            Err(err) => eprintln!("search failed: {err}"),
        }
    }
}
