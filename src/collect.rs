//! Result collection for move-found reports.
//!
//! The delegated engine reports candidate moves repeatedly during iterative
//! deepening, re-announcing the principal variations each time it completes a
//! deeper iteration. The collector keeps only the deepest generation of
//! reports: a report at a greater depth than any seen so far discards the
//! accumulated collection before being inserted. Within a generation, entries
//! are ordered by score, with insertion order preserved among equal scores.

use std::collections::BTreeMap;

use crate::backend::MoveReport;

/// One ranked candidate move from the most recent search.
#[derive(Debug, Clone)]
pub struct CandidateMove {
    /// Move in UCI notation, e.g. "e2e4"
    pub mv: String,
    /// Iteration depth at which this evaluation was produced
    pub depth: u32,
    /// Selective depth the search completed for this line
    pub completed_depth: u32,
    /// Evaluation score (centipawns, side to move)
    pub score: f32,
}

/// Score-ordered accumulator for move-found reports.
#[derive(Debug, Default)]
pub struct MoveCollector {
    by_score: BTreeMap<i32, Vec<CandidateMove>>,
    deepest: u32,
}

impl MoveCollector {
    #[must_use]
    pub fn new() -> Self {
        MoveCollector::default()
    }

    /// Record one move-found report, applying the clear-on-deeper-depth rule.
    pub fn record(&mut self, report: MoveReport) {
        if !self.by_score.is_empty() && report.depth > self.deepest {
            self.by_score.clear();
        }
        self.deepest = self.deepest.max(report.depth);
        self.by_score
            .entry(report.score_cp)
            .or_default()
            .push(CandidateMove {
                mv: report.mv,
                depth: report.depth,
                completed_depth: report.seldepth,
                score: report.score_cp as f32,
            });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_score.is_empty()
    }

    /// Drain the collection in ascending score order, deduplicated by move
    /// identity (the first occurrence in ascending order is kept).
    #[must_use]
    pub fn drain_ranked(self) -> Vec<CandidateMove> {
        let mut ranked: Vec<CandidateMove> = Vec::new();
        for (_, entries) in self.by_score {
            for candidate in entries {
                if ranked.iter().any(|c| c.mv == candidate.mv) {
                    continue;
                }
                ranked.push(candidate);
            }
        }
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(mv: &str, depth: u32, seldepth: u32, score_cp: i32) -> MoveReport {
        MoveReport {
            mv: mv.to_string(),
            depth,
            seldepth,
            score_cp,
        }
    }

    #[test]
    fn test_drain_is_ascending_by_score() {
        let mut collector = MoveCollector::new();
        collector.record(report("e2e4", 3, 4, 30));
        collector.record(report("d2d4", 3, 4, -10));
        collector.record(report("g1f3", 3, 4, 15));
        let ranked = collector.drain_ranked();
        let scores: Vec<i32> = ranked.iter().map(|c| c.score as i32).collect();
        assert_eq!(scores, vec![-10, 15, 30]);
    }

    #[test]
    fn test_deeper_report_clears_earlier_generation() {
        let mut collector = MoveCollector::new();
        collector.record(report("e2e4", 2, 3, 20));
        collector.record(report("d2d4", 2, 3, 10));
        collector.record(report("g1f3", 3, 5, 25));
        let ranked = collector.drain_ranked();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].mv, "g1f3");
        assert_eq!(ranked[0].depth, 3);
        assert_eq!(ranked[0].completed_depth, 5);
    }

    #[test]
    fn test_shallower_report_after_deeper_is_kept() {
        // Only strictly deeper reports clear; a late shallower report joins
        // the current generation, as in the original collection policy.
        let mut collector = MoveCollector::new();
        collector.record(report("e2e4", 3, 4, 20));
        collector.record(report("d2d4", 2, 3, 10));
        let ranked = collector.drain_ranked();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_duplicate_moves_keep_first_in_ascending_order() {
        let mut collector = MoveCollector::new();
        collector.record(report("e2e4", 3, 4, 10));
        collector.record(report("e2e4", 3, 5, 40));
        let ranked = collector.drain_ranked();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score as i32, 10);
        assert_eq!(ranked[0].completed_depth, 4);
    }

    #[test]
    fn test_equal_scores_preserve_insertion_order() {
        let mut collector = MoveCollector::new();
        collector.record(report("e2e4", 3, 4, 0));
        collector.record(report("d2d4", 3, 4, 0));
        collector.record(report("g1f3", 3, 4, 0));
        let ranked = collector.drain_ranked();
        let moves: Vec<&str> = ranked.iter().map(|c| c.mv.as_str()).collect();
        assert_eq!(moves, vec!["e2e4", "d2d4", "g1f3"]);
    }

    #[test]
    fn test_empty_collector() {
        let collector = MoveCollector::new();
        assert!(collector.is_empty());
        assert!(collector.drain_ranked().is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const MOVES: &[&str] = &["e2e4", "d2d4", "g1f3", "c2c4", "b1c3", "f2f4"];

        proptest! {
            #[test]
            fn drained_list_is_sorted_and_unique(
                reports in prop::collection::vec(
                    (0usize..MOVES.len(), 1u32..6, -400i32..400),
                    0..40,
                )
            ) {
                let mut collector = MoveCollector::new();
                for (mv_idx, depth, score) in &reports {
                    collector.record(report(MOVES[*mv_idx], *depth, depth + 1, *score));
                }
                let ranked = collector.drain_ranked();

                for pair in ranked.windows(2) {
                    prop_assert!(pair[0].score <= pair[1].score);
                }
                for (i, a) in ranked.iter().enumerate() {
                    for b in ranked.iter().skip(i + 1) {
                        prop_assert_ne!(&a.mv, &b.mv);
                    }
                }
                // Every retained entry corresponds to some recorded report
                for c in &ranked {
                    let matched = reports.iter().any(|(mv_idx, depth, score)| {
                        MOVES[*mv_idx] == c.mv
                            && *depth == c.depth
                            && *score == c.score as i32
                    });
                    prop_assert!(matched);
                }
            }
        }
    }
}
