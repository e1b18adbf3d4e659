//! Draft-log reconstruction and pick-evaluation core.
//!
//! This module holds everything needed to turn raw draft logs into scored
//! pick decisions:
//!
//! 1. Reconstructing who-saw-what-when from the flat per-draft token rows
//! 2. Tracking the evolving color commitment of a drafter
//! 3. Scoring candidate cards against that commitment
//! 4. Aggregating policy accuracy against recorded human picks
//!
//! # Overview
//!
//! A draft row records only the final piles each seat ends up holding. The
//! [`PackReconstructor`] inverts the round-robin passing topology to recover
//! the exact pack contents at every decision point. Each reconstructed
//! [`Draft`] is immutable and can be replayed through any number of
//! policies; the [`DraftScorer`] compares their ranked preferences against
//! the human's recorded choices.
//!
//! # Usage
//!
//! ```ignore
//! use draft_eval::draft::{BotConfig, CardCatalog, DraftScorer, PackReconstructor};
//! use draft_eval::bots::RatingBiasPolicy;
//!
//! let catalog = CardCatalog::from_tsv_files("ratings.tsv", Some("lands.tsv"))?;
//! let corpus = PackReconstructor::default().parse_corpus(&raw_rows);
//!
//! let mut policies: Vec<Box<dyn PickPolicy>> =
//!     vec![Box::new(RatingBiasPolicy::new(catalog.into(), BotConfig::default()))];
//! let report = DraftScorer::new().evaluate(&corpus.drafts, &mut policies)?;
//! println!("exact: {:.3}", report.accuracy[0].exact_rate());
//! ```

pub mod card;
pub mod commitment;
pub mod config;
pub mod evaluator;
pub mod features;
pub mod policy;
pub mod reconstruct;
pub mod scorer;

// Re-export main types for convenient access
pub use card::{Card, CardCatalog, CatalogError, ColorVector, NUM_COLORS, normalize_name};
pub use commitment::ColorCommitmentTracker;
pub use config::{BotConfig, ConfigError};
pub use evaluator::{EvalError, PickEvaluator, rank_slots};
pub use features::{CardIndexer, encode_pick};
pub use policy::PickPolicy;
pub use reconstruct::{Corpus, Draft, PackReconstructor, ParseError, Pick};
pub use scorer::{DraftScorer, EvaluationReport, PickRow, PolicyAccuracy};
