//! Pick policy implementations.
//!
//! This module contains the concrete drafters that can be scored by the
//! generic [`DraftScorer`](crate::draft::DraftScorer). They serve as:
//!
//! 1. **Baselines**: the random and rarity drafters bound the accuracy
//!    range any serious policy should land in.
//!
//! 2. **The reference heuristic**: [`RatingBiasPolicy`] reproduces the
//!    production drafting logic (static ratings plus dynamic color bias).
//!
//! 3. **Training**: [`SgdTrainer`] fits the rating table itself against
//!    recorded human picks.
//!
//! ## Adding New Policies
//!
//! Implement [`PickPolicy`](crate::draft::PickPolicy) for your type and
//! hand it to the scorer; a learned model slots in the same way the
//! heuristics do.

pub mod random;
pub mod raredraft;
pub mod rating;
pub mod sgd;

// Re-export the policy types at module level
pub use random::RandomPolicy;
pub use raredraft::RaredraftPolicy;
pub use rating::RatingBiasPolicy;
pub use sgd::{RatingDict, RatingEntry, SgdTrainer};
