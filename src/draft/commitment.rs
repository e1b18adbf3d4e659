//! Color commitment tracking across a draft.
//!
//! The tracker accumulates "good-card pressure" per color as picks resolve
//! and derives how many colors the drafter has settled into. It is owned by
//! exactly one bot run over one draft and reset between drafts.

use crate::draft::card::{ColorVector, NUM_COLORS};
use crate::draft::config::BotConfig;

/// Stateful per-draft accumulator of color pressure.
///
/// Transition rule: every resolved pick adds
/// `max(0, rating - rating_threshold)` to each color the picked card has
/// pips in, so cards below the playability threshold contribute nothing.
/// The committed-color count is recomputed after every update: colors whose
/// pressure strictly exceeds `color_commit_threshold`, clamped to 2, and
/// forced to exactly 2 once `pack_size + commit_pick_offset` cards have been
/// picked. The forced transition is irreversible by construction since the
/// pick count only grows.
#[derive(Debug, Clone)]
pub struct ColorCommitmentTracker {
    config: BotConfig,
    pack_size: usize,
    pressure: ColorVector,
    picks_made: usize,
    committed_colors: u8,
}

impl ColorCommitmentTracker {
    /// Create a fresh tracker for a draft with the given pack size.
    pub fn new(config: BotConfig, pack_size: usize) -> Self {
        Self {
            config,
            pack_size,
            pressure: [0.0; NUM_COLORS],
            picks_made: 0,
            committed_colors: 0,
        }
    }

    /// Reset all state for a new draft.
    pub fn reset(&mut self, pack_size: usize) {
        self.pack_size = pack_size;
        self.pressure = [0.0; NUM_COLORS];
        self.picks_made = 0;
        self.committed_colors = 0;
    }

    /// Record a resolved pick and update the commitment state.
    pub fn record_pick(&mut self, colors: &ColorVector, rating: f64) {
        let contribution = (rating - self.config.rating_threshold).max(0.0);
        for i in 0..NUM_COLORS {
            if colors[i] > 0.0 {
                self.pressure[i] += contribution;
            }
        }
        self.picks_made += 1;
        self.update_committed();
    }

    fn update_committed(&mut self) {
        let over_threshold = self
            .pressure
            .iter()
            .filter(|&&p| p > self.config.color_commit_threshold)
            .count()
            .min(2) as u8;

        // Past the settling point the drafter is locked into two colors no
        // matter what the accumulators say.
        self.committed_colors =
            if self.picks_made >= self.pack_size + self.config.commit_pick_offset {
                2
            } else {
                over_threshold
            };
    }

    /// Accumulated pressure per color.
    pub fn pressure(&self) -> &ColorVector {
        &self.pressure
    }

    /// Number of colors the drafter is committed to (0, 1, or 2).
    pub fn committed_colors(&self) -> u8 {
        self.committed_colors
    }

    /// Number of picks recorded so far.
    pub fn picks_made(&self) -> usize {
        self.picks_made
    }

    /// Pack size of the draft in progress.
    pub fn pack_size(&self) -> usize {
        self.pack_size
    }

    /// Number of colors with any pressure at all.
    pub fn pressured_colors(&self) -> usize {
        self.pressure.iter().filter(|&&p| p > 0.0).count()
    }

    /// Indices of the highest and second-highest pressure colors.
    ///
    /// Ties resolve to the lower color index, and the two indices are always
    /// distinct.
    pub fn top_two(&self) -> (usize, usize) {
        let mut first = 0;
        for i in 1..NUM_COLORS {
            if self.pressure[i] > self.pressure[first] {
                first = i;
            }
        }
        let mut second = usize::MAX;
        for i in 0..NUM_COLORS {
            if i == first {
                continue;
            }
            if second == usize::MAX || self.pressure[i] > self.pressure[second] {
                second = i;
            }
        }
        (first, second)
    }

    /// The configuration this tracker was built with.
    pub fn config(&self) -> &BotConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: ColorVector = [0.0, 0.0, 0.0, 0.0, 1.0];
    const BLUE: ColorVector = [0.0, 1.0, 0.0, 0.0, 0.0];

    #[test]
    fn test_sub_threshold_ratings_add_no_pressure() {
        // Three copies of a 1.2-rated green card against a 2.0 playability
        // threshold: 3 * max(0, 1.2 - 2.0) = 0 pressure.
        let mut tracker = ColorCommitmentTracker::new(BotConfig::default(), 15);
        for _ in 0..3 {
            tracker.record_pick(&GREEN, 1.2);
        }
        assert_eq!(tracker.pressure()[4], 0.0);
        assert_eq!(tracker.committed_colors(), 0);
        assert_eq!(tracker.pressured_colors(), 0);
    }

    #[test]
    fn test_commitment_requires_strictly_exceeding_threshold() {
        let config = BotConfig::default();
        let mut tracker = ColorCommitmentTracker::new(config.clone(), 15);

        // One pick of pressure exactly at the threshold does not commit.
        tracker.record_pick(&GREEN, config.rating_threshold + config.color_commit_threshold);
        assert_eq!(tracker.pressure()[4], config.color_commit_threshold);
        assert_eq!(tracker.committed_colors(), 0);

        // Any more green pressure crosses it.
        tracker.record_pick(&GREEN, 3.0);
        assert_eq!(tracker.committed_colors(), 1);
    }

    #[test]
    fn test_committed_colors_clamped_to_two() {
        let mut tracker = ColorCommitmentTracker::new(BotConfig::default(), 15);
        for colors in [GREEN, BLUE, [0.0, 0.0, 1.0, 0.0, 0.0]] {
            for _ in 0..3 {
                tracker.record_pick(&colors, 4.5);
            }
        }
        // Three colors over threshold still report as two.
        assert_eq!(tracker.committed_colors(), 2);
    }

    #[test]
    fn test_forced_two_color_transition() {
        let config = BotConfig::default();
        let pack_size = 15;
        let mut tracker = ColorCommitmentTracker::new(config.clone(), pack_size);

        // Picks with zero pressure contribution never commit organically.
        let settle_at = pack_size + config.commit_pick_offset;
        for _ in 0..settle_at - 1 {
            tracker.record_pick(&GREEN, 1.0);
        }
        assert_eq!(tracker.committed_colors(), 0);

        tracker.record_pick(&GREEN, 1.0);
        assert_eq!(tracker.picks_made(), settle_at);
        assert_eq!(tracker.committed_colors(), 2);
    }

    #[test]
    fn test_top_two_is_deterministic() {
        let mut tracker = ColorCommitmentTracker::new(BotConfig::default(), 15);
        tracker.record_pick(&BLUE, 5.0);
        tracker.record_pick(&GREEN, 4.0);
        assert_eq!(tracker.top_two(), (1, 4));

        // All-zero pressure: ties break toward the lower index, and the two
        // results stay distinct.
        let fresh = ColorCommitmentTracker::new(BotConfig::default(), 15);
        assert_eq!(fresh.top_two(), (0, 1));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut tracker = ColorCommitmentTracker::new(BotConfig::default(), 15);
        tracker.record_pick(&GREEN, 5.0);
        tracker.reset(14);
        assert_eq!(tracker.picks_made(), 0);
        assert_eq!(tracker.committed_colors(), 0);
        assert_eq!(tracker.pack_size(), 14);
        assert_eq!(*tracker.pressure(), [0.0; NUM_COLORS]);
    }
}
