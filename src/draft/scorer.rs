//! Corpus-level accuracy scoring of pick policies.
//!
//! The scorer replays reconstructed drafts through one or more policies and
//! compares each policy's ranked preferences against the recorded human
//! choices. Results aggregate into exact-match rate, fuzzy (top-3) rate,
//! mean rank error and per-card accuracy, and export as tab-separated
//! reports.

use std::fs;
use std::io;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::draft::evaluator::EvalError;
use crate::draft::policy::PickPolicy;
use crate::draft::reconstruct::Draft;

/// Identifying fields of one scored pick event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRow {
    /// 1-based draft number within the evaluated corpus.
    pub draft_num: usize,
    /// 1-based pick number within the draft.
    pub pick_num: usize,
    /// The card the human took.
    pub human_pick: String,
}

/// Aggregate accuracy statistics for one policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyAccuracy {
    /// Policy display name.
    pub name: String,
    /// Picks evaluated.
    pub total: usize,
    /// Picks where the policy's top choice matched the human.
    pub exact: usize,
    /// Picks where the human's choice was within the fuzzy depth.
    pub fuzzy: usize,
    /// Sum of the human choice's 0-indexed rank positions.
    pub rank_error_sum: f64,
}

impl PolicyAccuracy {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            total: 0,
            exact: 0,
            fuzzy: 0,
            rank_error_sum: 0.0,
        }
    }

    /// Fraction of picks where the top choice matched the human's.
    pub fn exact_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.exact as f64 / self.total as f64
        }
    }

    /// Fraction of picks where the human's choice was in the top ranks.
    pub fn fuzzy_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.fuzzy as f64 / self.total as f64
        }
    }

    /// Average 0-indexed position of the human's choice in the ranking.
    pub fn mean_rank_error(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.rank_error_sum / self.total as f64
        }
    }
}

/// Full evaluation result: per-pick correctness plus per-policy aggregates.
#[derive(Debug, Clone, Default)]
pub struct EvaluationReport {
    /// Policy names in evaluation order.
    pub policy_names: Vec<String>,
    /// One row per scored pick.
    pub rows: Vec<PickRow>,
    /// Exact-correct flags, indexed `[policy][row]`.
    pub exact: Vec<Vec<u8>>,
    /// Fuzzy-correct flags, indexed `[policy][row]`.
    pub fuzzy: Vec<Vec<u8>>,
    /// Aggregates per policy.
    pub accuracy: Vec<PolicyAccuracy>,
}

impl EvaluationReport {
    /// Append another report over a disjoint slice of the corpus.
    ///
    /// Both reports must cover the same policies in the same order.
    pub fn merge(&mut self, other: EvaluationReport) {
        if self.policy_names.is_empty() {
            *self = other;
            return;
        }
        debug_assert_eq!(self.policy_names, other.policy_names);

        self.rows.extend(other.rows);
        for (mine, theirs) in self.exact.iter_mut().zip(other.exact) {
            mine.extend(theirs);
        }
        for (mine, theirs) in self.fuzzy.iter_mut().zip(other.fuzzy) {
            mine.extend(theirs);
        }
        for (mine, theirs) in self.accuracy.iter_mut().zip(other.accuracy) {
            mine.total += theirs.total;
            mine.exact += theirs.exact;
            mine.fuzzy += theirs.fuzzy;
            mine.rank_error_sum += theirs.rank_error_sum;
        }
    }

    /// Per-card exact accuracy: for every distinct human pick, each
    /// policy's exact-match rate over the picks of that card.
    ///
    /// Returned rows are sorted by card name.
    pub fn card_accuracy(&self) -> Vec<(String, Vec<f64>)> {
        let mut counts: FxHashMap<&str, (usize, Vec<usize>)> = FxHashMap::default();
        for (row_idx, row) in self.rows.iter().enumerate() {
            let entry = counts
                .entry(&row.human_pick)
                .or_insert_with(|| (0, vec![0; self.policy_names.len()]));
            entry.0 += 1;
            for (policy_idx, flags) in self.exact.iter().enumerate() {
                entry.1[policy_idx] += flags[row_idx] as usize;
            }
        }

        let mut result: Vec<(String, Vec<f64>)> = counts
            .into_iter()
            .map(|(name, (total, correct))| {
                let rates = correct
                    .into_iter()
                    .map(|c| c as f64 / total as f64)
                    .collect();
                (name.to_string(), rates)
            })
            .collect();
        result.sort_by(|a, b| a.0.cmp(&b.0));
        result
    }

    fn render_pick_matrix(&self, matrix: &[Vec<u8>]) -> String {
        let mut out = String::from("draft_num\tpick_num\thuman_pick");
        for name in &self.policy_names {
            out.push('\t');
            out.push_str(name);
        }
        out.push('\n');

        for (row_idx, row) in self.rows.iter().enumerate() {
            out.push_str(&format!(
                "{}\t{}\t{}",
                row.draft_num, row.pick_num, row.human_pick
            ));
            for flags in matrix {
                out.push_str(&format!("\t{}", flags[row_idx]));
            }
            out.push('\n');
        }
        out
    }

    fn render_card_accuracy(&self) -> String {
        let mut out = String::from("human_pick");
        for name in &self.policy_names {
            out.push('\t');
            out.push_str(name);
        }
        out.push('\n');

        for (card, rates) in self.card_accuracy() {
            out.push_str(&card);
            for rate in rates {
                out.push_str(&format!("\t{}", rate));
            }
            out.push('\n');
        }
        out
    }

    /// Write the per-pick exact-correctness table.
    pub fn write_exact_tsv<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.render_pick_matrix(&self.exact))
    }

    /// Write the per-pick fuzzy-correctness table.
    pub fn write_fuzzy_tsv<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.render_pick_matrix(&self.fuzzy))
    }

    /// Write the per-card accuracy table.
    pub fn write_card_accuracy_tsv<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.render_card_accuracy())
    }
}

/// Scores policies against recorded human picks.
///
/// A scorer holds no mutable state; every call to
/// [`evaluate`](Self::evaluate) is a pure function of the corpus and the
/// policies handed in.
#[derive(Debug, Clone, Copy)]
pub struct DraftScorer {
    fuzzy_depth: usize,
}

impl Default for DraftScorer {
    fn default() -> Self {
        Self { fuzzy_depth: 3 }
    }
}

impl DraftScorer {
    /// Create a scorer with the default top-3 fuzzy depth.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set how deep in the ranking a human choice still
    /// counts as fuzzy-correct.
    pub fn with_fuzzy_depth(mut self, depth: usize) -> Self {
        self.fuzzy_depth = depth;
        self
    }

    /// Evaluate policies over a corpus of drafts.
    pub fn evaluate(
        &self,
        drafts: &[Draft],
        policies: &mut [Box<dyn PickPolicy>],
    ) -> Result<EvaluationReport, EvalError> {
        self.evaluate_with_offset(drafts, policies, 0)
    }

    /// Evaluate policies over a slice of a larger corpus.
    ///
    /// `first_draft_index` is the 0-based corpus position of `drafts[0]`,
    /// so reports merged from disjoint slices keep global draft numbering.
    pub fn evaluate_with_offset(
        &self,
        drafts: &[Draft],
        policies: &mut [Box<dyn PickPolicy>],
        first_draft_index: usize,
    ) -> Result<EvaluationReport, EvalError> {
        let total_picks: usize = drafts.iter().map(|d| d.picks.len()).sum();

        let mut rows = Vec::with_capacity(total_picks);
        for (draft_idx, draft) in drafts.iter().enumerate() {
            for (pick_idx, pick) in draft.picks.iter().enumerate() {
                rows.push(PickRow {
                    draft_num: first_draft_index + draft_idx + 1,
                    pick_num: pick_idx + 1,
                    human_pick: pick.chosen().to_string(),
                });
            }
        }

        let mut exact = Vec::with_capacity(policies.len());
        let mut fuzzy = Vec::with_capacity(policies.len());
        let mut accuracy = Vec::with_capacity(policies.len());

        for policy in policies.iter_mut() {
            let mut policy_exact = Vec::with_capacity(total_picks);
            let mut policy_fuzzy = Vec::with_capacity(total_picks);
            let mut stats = PolicyAccuracy::new(policy.name());

            for draft in drafts {
                policy.begin_draft(draft.pack_size);
                let mut collection: Vec<String> = Vec::with_capacity(draft.picks.len());

                for pick in &draft.picks {
                    let order = policy.rank(&pick.pack, &collection)?;
                    debug_assert_eq!(order.len(), pick.pack.len());

                    // Slot 0 is the human's recorded choice.
                    let position = order
                        .iter()
                        .position(|&slot| slot == 0)
                        .unwrap_or(order.len());

                    let is_exact = position == 0;
                    let is_fuzzy = position < self.fuzzy_depth;
                    policy_exact.push(is_exact as u8);
                    policy_fuzzy.push(is_fuzzy as u8);

                    stats.total += 1;
                    stats.exact += is_exact as usize;
                    stats.fuzzy += is_fuzzy as usize;
                    stats.rank_error_sum += position as f64;

                    policy.observe_pick(pick.chosen());
                    collection.push(pick.chosen().to_string());
                }
            }

            exact.push(policy_exact);
            fuzzy.push(policy_fuzzy);
            accuracy.push(stats);
        }

        Ok(EvaluationReport {
            policy_names: policies.iter().map(|p| p.name().to_string()).collect(),
            rows,
            exact,
            fuzzy,
            accuracy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::reconstruct::Pick;

    /// Always ranks pack slots in their original order, so slot 0 (the
    /// human's choice) is always first.
    struct OraclePolicy;

    impl PickPolicy for OraclePolicy {
        fn name(&self) -> &str {
            "oracle"
        }

        fn rank(&mut self, pack: &[String], _collection: &[String]) -> Result<Vec<usize>, EvalError> {
            Ok((0..pack.len()).collect())
        }
    }

    /// Always ranks pack slots in reverse order.
    struct ContrarianPolicy;

    impl PickPolicy for ContrarianPolicy {
        fn name(&self) -> &str {
            "contrarian"
        }

        fn rank(&mut self, pack: &[String], _collection: &[String]) -> Result<Vec<usize>, EvalError> {
            Ok((0..pack.len()).rev().collect())
        }
    }

    fn toy_draft() -> Draft {
        Draft {
            pack_size: 2,
            picks: vec![
                Pick {
                    pack: vec!["alpha".into(), "beta".into()],
                },
                Pick {
                    pack: vec!["gamma".into()],
                },
            ],
        }
    }

    #[test]
    fn test_oracle_policy_scores_perfectly() {
        let scorer = DraftScorer::new();
        let mut policies: Vec<Box<dyn PickPolicy>> = vec![Box::new(OraclePolicy)];
        let report = scorer.evaluate(&[toy_draft()], &mut policies).unwrap();

        let stats = &report.accuracy[0];
        assert_eq!(stats.total, 2);
        assert_eq!(stats.exact_rate(), 1.0);
        assert_eq!(stats.fuzzy_rate(), 1.0);
        assert_eq!(stats.mean_rank_error(), 0.0);
    }

    #[test]
    fn test_contrarian_policy_rank_error() {
        let scorer = DraftScorer::new();
        let mut policies: Vec<Box<dyn PickPolicy>> = vec![Box::new(ContrarianPolicy)];
        let report = scorer.evaluate(&[toy_draft()], &mut policies).unwrap();

        // Two-card pack puts the human choice second (position 1); the
        // one-card pack is trivially exact.
        let stats = &report.accuracy[0];
        assert_eq!(stats.exact, 1);
        assert_eq!(stats.fuzzy, 2);
        assert!((stats.mean_rank_error() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_report_rows_and_tsv_layout() {
        let scorer = DraftScorer::new();
        let mut policies: Vec<Box<dyn PickPolicy>> =
            vec![Box::new(OraclePolicy), Box::new(ContrarianPolicy)];
        let report = scorer.evaluate(&[toy_draft()], &mut policies).unwrap();

        assert_eq!(report.rows[0].draft_num, 1);
        assert_eq!(report.rows[0].pick_num, 1);
        assert_eq!(report.rows[1].pick_num, 2);

        let tsv = report.render_pick_matrix(&report.exact);
        let mut lines = tsv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "draft_num\tpick_num\thuman_pick\toracle\tcontrarian"
        );
        assert_eq!(lines.next().unwrap(), "1\t1\talpha\t1\t0");
        assert_eq!(lines.next().unwrap(), "1\t2\tgamma\t1\t1");
    }

    #[test]
    fn test_card_accuracy_partitions_by_human_pick() {
        let scorer = DraftScorer::new();
        let mut policies: Vec<Box<dyn PickPolicy>> = vec![Box::new(ContrarianPolicy)];
        let drafts = [toy_draft(), toy_draft()];
        let report = scorer.evaluate(&drafts, &mut policies).unwrap();

        let by_card = report.card_accuracy();
        assert_eq!(by_card.len(), 2);
        // Sorted by name: "alpha" picks are always missed, "gamma" always hit.
        assert_eq!(by_card[0].0, "alpha");
        assert_eq!(by_card[0].1, vec![0.0]);
        assert_eq!(by_card[1].0, "gamma");
        assert_eq!(by_card[1].1, vec![1.0]);
    }

    #[test]
    fn test_merge_keeps_global_numbering() {
        let scorer = DraftScorer::new();
        let drafts = [toy_draft(), toy_draft()];

        let mut first: Vec<Box<dyn PickPolicy>> = vec![Box::new(OraclePolicy)];
        let mut second: Vec<Box<dyn PickPolicy>> = vec![Box::new(OraclePolicy)];
        let mut report = scorer
            .evaluate_with_offset(&drafts[..1], &mut first, 0)
            .unwrap();
        report.merge(
            scorer
                .evaluate_with_offset(&drafts[1..], &mut second, 1)
                .unwrap(),
        );

        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.rows[2].draft_num, 2);
        assert_eq!(report.accuracy[0].total, 4);
        assert_eq!(report.accuracy[0].exact_rate(), 1.0);
    }
}
