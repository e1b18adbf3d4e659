//! Rarity-first heuristic policy.

use std::sync::Arc;

use crate::draft::card::{CardCatalog, NUM_COLORS};
use crate::draft::evaluator::{rank_slots, EvalError};
use crate::draft::policy::PickPolicy;

/// Rarity score weights: mythic, rare, uncommon.
const MYTHIC_WEIGHT: f64 = 10.0;
const RARE_WEIGHT: f64 = 5.0;
const UNCOMMON_WEIGHT: f64 = 2.0;

/// Drafts the rarest card, nudged toward the collection's dominant color.
///
/// Scores rarity (mythic 10, rare 5, uncommon 2) plus 1 when the card has
/// pips in whichever color dominates the collection so far. A deliberately
/// naive reference point between the random floor and the rating bots.
#[derive(Debug, Clone)]
pub struct RaredraftPolicy {
    catalog: Arc<CardCatalog>,
}

impl RaredraftPolicy {
    /// Create a policy over the given catalog.
    pub fn new(catalog: Arc<CardCatalog>) -> Self {
        Self { catalog }
    }

    /// Color index with the most pips across the collection.
    ///
    /// Ties (including the empty collection) resolve to the lowest index.
    fn dominant_color(&self, collection: &[String]) -> usize {
        let mut pips = [0.0; NUM_COLORS];
        for card in collection {
            let cv = self.catalog.color_vector(card);
            for i in 0..NUM_COLORS {
                pips[i] += cv[i];
            }
        }

        let mut best = 0;
        for i in 1..NUM_COLORS {
            if pips[i] > pips[best] {
                best = i;
            }
        }
        best
    }

    fn rarity_weight(&self, name: &str) -> f64 {
        match self.catalog.rarity(name) {
            'M' => MYTHIC_WEIGHT,
            'R' => RARE_WEIGHT,
            'U' => UNCOMMON_WEIGHT,
            _ => 0.0,
        }
    }
}

impl PickPolicy for RaredraftPolicy {
    fn name(&self) -> &str {
        "raredraft"
    }

    fn rank(&mut self, pack: &[String], collection: &[String]) -> Result<Vec<usize>, EvalError> {
        let dominant = self.dominant_color(collection);

        let mut scores = Vec::with_capacity(pack.len());
        let mut base_ratings = Vec::with_capacity(pack.len());
        for card in pack {
            let mut score = self.rarity_weight(card);
            if self.catalog.color_vector(card)[dominant] > 0.0 {
                score += 1.0;
            }
            scores.push(score);
            base_ratings.push(self.catalog.rating(card));
        }

        Ok(rank_slots(&scores, &base_ratings))
    }
}
