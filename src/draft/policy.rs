//! Pick policy trait definition.
//!
//! Any pick-ranking strategy that implements [`PickPolicy`] can be scored
//! against recorded human picks by the
//! [`DraftScorer`](crate::draft::DraftScorer). This keeps the scoring
//! machinery independent of whether preferences come from a random
//! baseline, hand-tuned ratings, or a learned model.

use crate::draft::evaluator::EvalError;

/// A strategy that ranks the cards of a pack by pick preference.
///
/// The scorer drives one draft at a time: [`begin_draft`](Self::begin_draft)
/// resets any per-draft state, then for every pick event
/// [`rank`](Self::rank) is called with the pack and the collection picked so
/// far, followed by [`observe_pick`](Self::observe_pick) with the card the
/// human actually took. Within one draft the calls are strictly sequential;
/// across drafts a policy carries no state.
pub trait PickPolicy {
    /// Short display name used in reports.
    fn name(&self) -> &str;

    /// Reset per-draft state for a new draft with the given pack size.
    fn begin_draft(&mut self, _pack_size: usize) {}

    /// Rank the pack slots by preference, best first.
    ///
    /// # Arguments
    /// * `pack` - Cards available at this decision point (slot 0 is the
    ///   human's recorded choice, which the policy must not treat specially)
    /// * `collection` - Cards resolved to the drafter so far
    ///
    /// # Returns
    /// A permutation of `0..pack.len()` in decreasing preference order.
    fn rank(&mut self, pack: &[String], collection: &[String]) -> Result<Vec<usize>, EvalError>;

    /// Observe the resolved pick so stateful policies can update.
    fn observe_pick(&mut self, _card: &str) {}
}
