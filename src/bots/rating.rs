//! Rating-driven policy with dynamic color bias.

use std::sync::Arc;

use crate::draft::card::CardCatalog;
use crate::draft::commitment::ColorCommitmentTracker;
use crate::draft::config::BotConfig;
use crate::draft::evaluator::{rank_slots, EvalError, PickEvaluator};
use crate::draft::policy::PickPolicy;

/// The classic heuristic drafter: static catalog ratings plus a
/// history-dependent color bias.
///
/// Holds a [`ColorCommitmentTracker`] that follows the resolved picks of
/// the draft being replayed, so the same card can rank differently at pick
/// 3 and pick 30.
#[derive(Debug, Clone)]
pub struct RatingBiasPolicy {
    catalog: Arc<CardCatalog>,
    evaluator: PickEvaluator,
    tracker: ColorCommitmentTracker,
}

impl RatingBiasPolicy {
    /// Create a policy over the given catalog and tunables.
    pub fn new(catalog: Arc<CardCatalog>, config: BotConfig) -> Self {
        let tracker = ColorCommitmentTracker::new(config.clone(), 0);
        Self {
            catalog,
            evaluator: PickEvaluator::new(config),
            tracker,
        }
    }

    /// Current commitment state, mainly for inspection in tests.
    pub fn tracker(&self) -> &ColorCommitmentTracker {
        &self.tracker
    }
}

impl PickPolicy for RatingBiasPolicy {
    fn name(&self) -> &str {
        "rating_bias"
    }

    fn begin_draft(&mut self, pack_size: usize) {
        self.tracker.reset(pack_size);
    }

    fn rank(&mut self, pack: &[String], _collection: &[String]) -> Result<Vec<usize>, EvalError> {
        let mut scores = Vec::with_capacity(pack.len());
        let mut base_ratings = Vec::with_capacity(pack.len());

        for card in pack {
            let colors = self.catalog.color_vector(card);
            let rating = self.catalog.rating(card);
            let bias = self.evaluator.color_bias(card, &colors, &self.tracker)?;
            scores.push(rating + bias);
            base_ratings.push(rating);
        }

        Ok(rank_slots(&scores, &base_ratings))
    }

    fn observe_pick(&mut self, card: &str) {
        let colors = self.catalog.color_vector(card);
        let rating = self.catalog.rating(card);
        self.tracker.record_pick(&colors, rating);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::card::{Card, NUM_COLORS};

    fn card(name: &str, colors: [f64; NUM_COLORS], rating: f64) -> Card {
        Card {
            name: name.to_string(),
            color_vector: colors,
            mana_cost: String::new(),
            rarity: 'C',
            card_type: "Creature".to_string(),
            rating,
        }
    }

    fn catalog() -> Arc<CardCatalog> {
        let mut c = CardCatalog::new();
        c.insert(card("white_bomb", [1.0, 0.0, 0.0, 0.0, 0.0], 4.0));
        c.insert(card("white_ok", [1.0, 0.0, 0.0, 0.0, 0.0], 2.4));
        c.insert(card("red_good", [0.0, 0.0, 0.0, 1.0, 0.0], 2.5));
        Arc::new(c)
    }

    #[test]
    fn test_commitment_changes_ranking_over_a_draft() {
        let mut policy = RatingBiasPolicy::new(catalog(), BotConfig::default());
        policy.begin_draft(15);

        let pack: Vec<String> = ["red_good", "white_ok"].into_iter().map(str::to_string).collect();

        // Fresh draft: the red 2.5 narrowly outranks the white 2.4.
        let order = policy.rank(&pack, &[]).unwrap();
        assert_eq!(order[0], 0);

        // After several strong white picks the white card's bias wins.
        for _ in 0..3 {
            policy.observe_pick("white_bomb");
        }
        let order = policy.rank(&pack, &[]).unwrap();
        assert_eq!(order[0], 1);
    }

    #[test]
    fn test_begin_draft_resets_commitment() {
        let mut policy = RatingBiasPolicy::new(catalog(), BotConfig::default());
        policy.begin_draft(15);
        for _ in 0..3 {
            policy.observe_pick("white_bomb");
        }
        assert!(policy.tracker().pressure()[0] > 0.0);

        policy.begin_draft(15);
        assert_eq!(policy.tracker().picks_made(), 0);
        assert_eq!(policy.tracker().pressure()[0], 0.0);
    }

    #[test]
    fn test_unknown_cards_rank_by_nothing() {
        let mut policy = RatingBiasPolicy::new(catalog(), BotConfig::default());
        policy.begin_draft(15);

        // Unknown names fall back to zero rating and no colors; the known
        // card must rank first and the run must not abort.
        let pack: Vec<String> = ["mystery", "white_ok"].into_iter().map(str::to_string).collect();
        let order = policy.rank(&pack, &[]).unwrap();
        assert_eq!(order[0], 1);
    }

    #[test]
    fn test_full_pipeline_row_to_accuracy() {
        use crate::draft::{DraftScorer, PackReconstructor, PickPolicy};

        // Two seats, one pack round, pack size two: seat piles are
        // [white_bomb, red_good] and [white_ok, white_bomb], so our seat
        // opens [white_bomb, white_bomb] and then sees [red_good].
        let reconstructor = PackReconstructor::new(2, 1);
        let draft = reconstructor
            .parse_row("1,M19,white_bomb,red_good,white_ok,white_bomb")
            .unwrap();
        assert_eq!(draft.picks.len(), 2);

        let mut policies: Vec<Box<dyn PickPolicy>> =
            vec![Box::new(RatingBiasPolicy::new(catalog(), BotConfig::default()))];
        let report = DraftScorer::new()
            .evaluate(&[draft], &mut policies)
            .unwrap();

        // The 4.0-rated bomb is the clear first pick and the last pack has
        // one card, so the rating bot matches the human on both.
        assert_eq!(report.accuracy[0].exact_rate(), 1.0);
        assert_eq!(report.accuracy[0].mean_rank_error(), 0.0);
    }
}
