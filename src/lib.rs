//! # Draft Eval
//!
//! Draft-log reconstruction and pick-ranking bot evaluation for
//! collectible-card drafts.
//!
//! ## Features
//!
//! - **Pack Reconstruction**: recovers the exact pack every seat saw at
//!   every decision point from flat end-of-draft pile logs
//! - **Color Commitment Tracking**: stateful model of a drafter settling
//!   into colors over a draft
//! - **Pick Evaluation**: rating-plus-color-bias scoring of candidate cards
//! - **Policy Scoring**: exact, fuzzy and rank-error accuracy against
//!   recorded human picks
//! - **Rating Training**: SGD-style fitting of the rating table to a corpus
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use draft_eval::draft::{BotConfig, CardCatalog, DraftScorer, PackReconstructor, PickPolicy};
//! use draft_eval::bots::RatingBiasPolicy;
//!
//! // 1. Load the set catalog and the draft corpus
//! let catalog = Arc::new(CardCatalog::from_tsv_files("ratings.tsv", None)?);
//! let corpus = PackReconstructor::default().parse_corpus(&raw_rows);
//!
//! // 2. Score a policy against the recorded human picks
//! let mut policies: Vec<Box<dyn PickPolicy>> =
//!     vec![Box::new(RatingBiasPolicy::new(catalog, BotConfig::default()))];
//! let report = DraftScorer::new().evaluate(&corpus.drafts, &mut policies)?;
//! println!("exact-match rate: {:.3}", report.accuracy[0].exact_rate());
//! ```
//!
//! ## Modules
//!
//! - [`draft`]: Reconstruction, commitment tracking, evaluation and scoring
//! - [`bots`]: Concrete pick policies (random, rarity, rating-bias, SGD)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     DraftScorer (Generic)                       │
//! │  - Exact / fuzzy accuracy     - Rank error                      │
//! │  - Per-card accuracy          - TSV reports                     │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ implements PickPolicy trait
//!                               ▼
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    ┌─────────┐         ┌───────────┐         ┌───────────┐
//!    │ Random  │         │ Raredraft │         │  Rating   │
//!    │ Policy  │         │  Policy   │         │   Bias    │
//!    └─────────┘         └───────────┘         └───────────┘
//! ```

#![warn(missing_docs)]

/// Draft reconstruction and evaluation module.
///
/// This is the core module containing the reconstruction algorithm and the
/// scoring machinery.
pub mod draft;

/// Pick policy implementations module.
///
/// Contains the baseline and rating-driven drafters plus rating training.
pub mod bots;

// Re-export commonly used types at crate root for convenience
pub use draft::{
    BotConfig, CardCatalog, ColorCommitmentTracker, Draft, DraftScorer, EvalError,
    PackReconstructor, Pick, PickEvaluator, PickPolicy,
};
