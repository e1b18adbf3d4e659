//! Gradient-style rating optimization from recorded human picks.
//!
//! Every time a card in a pack outscores the card the human actually took,
//! that is evidence the ratings are wrong: the picked card's rating nudges
//! up and the rival's nudges down, proportional to the error. Repeated over
//! a corpus this pulls the rating table toward the revealed preferences of
//! the player base.

use std::fs;
use std::io;
use std::path::Path;

use log::warn;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use crate::draft::card::{CardCatalog, ColorVector, NUM_COLORS};
use crate::draft::commitment::ColorCommitmentTracker;
use crate::draft::config::BotConfig;
use crate::draft::evaluator::{EvalError, PickEvaluator};
use crate::draft::reconstruct::Draft;

/// One mutable rating entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingEntry {
    /// Mana symbol counts in WUBRG order.
    pub colors: ColorVector,
    /// Current rating; the only field the optimizer mutates.
    pub rating: f64,
}

/// Mapping from card name to color vector and mutable rating.
///
/// Exactly one optimizer instance mutates a dict during a single
/// optimization pass; everything else reads it.
#[derive(Debug, Clone, Default)]
pub struct RatingDict {
    entries: FxHashMap<String, RatingEntry>,
}

impl RatingDict {
    /// Create an empty dict.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a dict from catalog colors and ratings.
    pub fn from_catalog(catalog: &CardCatalog) -> Self {
        let mut dict = Self::new();
        for card in catalog.cards() {
            dict.insert(&card.name, card.color_vector, card.rating);
        }
        dict
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, name: &str, colors: ColorVector, rating: f64) {
        self.entries.insert(
            name.to_string(),
            RatingEntry { colors, rating },
        );
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&RatingEntry> {
        self.entries.get(name)
    }

    /// Current rating for a card, zero for unknown names.
    pub fn rating(&self, name: &str) -> f64 {
        match self.entries.get(name) {
            Some(e) => e.rating,
            None => {
                warn!("unknown card {:?} in rating dict: assuming zero rating", name);
                0.0
            }
        }
    }

    /// Color vector for a card, all-zero for unknown names.
    pub fn colors(&self, name: &str) -> ColorVector {
        match self.entries.get(name) {
            Some(e) => e.colors,
            None => {
                warn!("unknown card {:?} in rating dict: assuming no color identity", name);
                [0.0; NUM_COLORS]
            }
        }
    }

    /// Apply a batch of rating deltas in one step.
    ///
    /// Deltas for names absent from the dict are dropped with a warning.
    pub fn apply_deltas(&mut self, deltas: &[(String, f64)]) {
        for (name, delta) in deltas {
            match self.entries.get_mut(name) {
                Some(entry) => entry.rating += delta,
                None => warn!("dropping rating delta for unknown card {:?}", name),
            }
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dict is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RatingEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn render_tsv(&self) -> String {
        let mut rows: Vec<(&str, f64)> = self
            .entries
            .iter()
            .map(|(name, e)| (name.as_str(), e.rating))
            .collect();
        rows.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(b.0))
        });

        let mut out = String::from("name\trating\n");
        for (name, rating) in rows {
            out.push_str(&format!("{}\t{}\n", name, rating));
        }
        out
    }

    /// Write the dict as a rating-sorted TSV.
    pub fn write_tsv<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.render_tsv())
    }
}

/// Stochastic-gradient rating optimizer.
///
/// Each pass replays every draft (in shuffled order) with a rating-bias
/// drafter that follows the human's picks. Per pick, all rating deltas are
/// computed against a read-only snapshot of the dict and applied in one
/// atomic step, so the result does not depend on pack iteration order.
#[derive(Debug)]
pub struct SgdTrainer {
    dict: RatingDict,
    config: BotConfig,
    evaluator: PickEvaluator,
    learning_rate: f64,
    rng: StdRng,
    loss_history: Vec<f64>,
}

impl SgdTrainer {
    /// Create a trainer with an entropy-seeded draft shuffle.
    pub fn new(dict: RatingDict, config: BotConfig, learning_rate: f64) -> Self {
        Self::with_rng(dict, config, learning_rate, StdRng::from_entropy())
    }

    /// Create a trainer with a fixed shuffle seed for reproducible passes.
    pub fn seeded(dict: RatingDict, config: BotConfig, learning_rate: f64, seed: u64) -> Self {
        Self::with_rng(dict, config, learning_rate, StdRng::seed_from_u64(seed))
    }

    fn with_rng(dict: RatingDict, config: BotConfig, learning_rate: f64, rng: StdRng) -> Self {
        let evaluator = PickEvaluator::new(config.clone());
        Self {
            dict,
            config,
            evaluator,
            learning_rate,
            rng,
            loss_history: Vec::new(),
        }
    }

    /// Run one optimization pass over the corpus.
    ///
    /// # Returns
    /// The accumulated squared-update loss of the pass.
    pub fn run_pass(&mut self, drafts: &[Draft]) -> Result<f64, EvalError> {
        let mut order: Vec<usize> = (0..drafts.len()).collect();
        order.shuffle(&mut self.rng);

        let mut pass_loss = 0.0;
        for draft_idx in order {
            pass_loss += self.optimize_draft(&drafts[draft_idx])?;
        }

        self.loss_history.push(pass_loss);
        Ok(pass_loss)
    }

    fn optimize_draft(&mut self, draft: &Draft) -> Result<f64, EvalError> {
        let mut tracker = ColorCommitmentTracker::new(self.config.clone(), draft.pack_size);
        let mut draft_loss = 0.0;

        for pick in &draft.picks {
            let picked = pick.chosen();

            // Score the whole pack against the pre-pick ratings.
            let mut picked_total = 0.0;
            let mut picked_delta = 0.0;
            let mut deltas: Vec<(String, f64)> = Vec::new();

            for (slot, card) in pick.pack.iter().enumerate() {
                let colors = self.dict.colors(card);
                let bias = self.evaluator.color_bias(card, &colors, &tracker)?;
                let total = self.dict.rating(card) + bias;

                if slot == 0 {
                    picked_total = total;
                    continue;
                }

                // A rival outscoring the human's choice is a rating error.
                let residual = (total - picked_total).max(0.0);
                if residual > 0.0 {
                    let amount = self.learning_rate * 2.0 * residual;
                    picked_delta += amount;
                    deltas.push((card.clone(), -amount));
                    draft_loss += amount * amount;
                }
            }

            // Advance the drafter along the human's line using the pre-pick
            // ratings, then apply the whole delta batch at once.
            tracker.record_pick(&self.dict.colors(picked), self.dict.rating(picked));
            if picked_delta != 0.0 {
                deltas.push((picked.to_string(), picked_delta));
            }
            self.dict.apply_deltas(&deltas);
        }

        Ok(draft_loss)
    }

    /// Squared-update loss of each completed pass.
    pub fn loss_history(&self) -> &[f64] {
        &self.loss_history
    }

    /// The rating dict in its current state.
    pub fn dict(&self) -> &RatingDict {
        &self.dict
    }

    /// Consume the trainer and take the optimized dict.
    pub fn into_dict(self) -> RatingDict {
        self.dict
    }
}
