//! Color-bias pick evaluation.
//!
//! The evaluator turns the commitment state built up by
//! [`ColorCommitmentTracker`] into a per-card score adjustment. While the
//! drafter is speculating (0-1 committed colors) the bias rewards staying
//! open and following accumulated pressure; once two colors are locked in,
//! scoring collapses to an on-color/off-color split.
//!
//! The branch structure is strict on the number of colors the candidate
//! card requires:
//!
//! | card colors | speculation rule                                        |
//! |-------------|---------------------------------------------------------|
//! | 4-5         | 0 (effectively uncastable, no reward)                   |
//! | 0           | 0 unless two colors carry pressure, else scaled max     |
//! | 2-3         | -multicolor_penalty, +pressure on-color, -off-color     |
//! | 1           | scaled pressure, halved on mono lean, second-color floor|

use std::fmt;

use crate::draft::card::{ColorVector, NUM_COLORS};
use crate::draft::commitment::ColorCommitmentTracker;
use crate::draft::config::BotConfig;

/// Errors raised during pick evaluation.
///
/// Unlike parse and lookup failures, these indicate a policy bug and abort
/// the evaluation run with full diagnostic context.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The commitment state matched none of the documented cases.
    DegenerateCommitment {
        /// Card being evaluated when the invariant broke.
        card: String,
        /// Commitment pressure vector at the time.
        commitment: ColorVector,
        /// Picks already resolved in the current draft.
        pick_index: usize,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DegenerateCommitment {
                card,
                commitment,
                pick_index,
            } => write!(
                f,
                "degenerate commitment state evaluating {:?} at pick {}: {:?}",
                card, pick_index, commitment
            ),
        }
    }
}

impl std::error::Error for EvalError {}

/// Computes the dynamic color bias for candidate cards.
#[derive(Debug, Clone)]
pub struct PickEvaluator {
    config: BotConfig,
}

impl PickEvaluator {
    /// Create an evaluator with the given tunables.
    pub fn new(config: BotConfig) -> Self {
        Self { config }
    }

    /// The configuration this evaluator was built with.
    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Compute the bias for one candidate card given the current commitment
    /// state. The final per-card score is `base rating + bias`.
    ///
    /// # Arguments
    /// * `card` - Card name, used only for diagnostics
    /// * `colors` - The candidate's color vector
    /// * `tracker` - Commitment state after all resolved picks so far
    pub fn color_bias(
        &self,
        card: &str,
        colors: &ColorVector,
        tracker: &ColorCommitmentTracker,
    ) -> Result<f64, EvalError> {
        let cfg = &self.config;
        let num_card_colors = colors.iter().filter(|&&c| c > 0.0).count();

        // 4-5 color cards are treated as uncastable in any phase.
        if num_card_colors >= 4 {
            return Ok(0.0);
        }

        let pressure = tracker.pressure();
        let denom = cfg.speculation_denom();

        match tracker.committed_colors() {
            // Speculation phase: still open to settling anywhere.
            0 | 1 => match num_card_colors {
                0 => {
                    if tracker.pressured_colors() < 2 {
                        return Ok(0.0);
                    }
                    let max_pressure = pressure.iter().cloned().fold(0.0, f64::max);
                    Ok((max_pressure / denom).min(cfg.max_bonus_spec))
                }
                1 => {
                    let color = colors
                        .iter()
                        .enumerate()
                        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                        .map(|(i, _)| i)
                        .unwrap_or(0);

                    let mut bias = (pressure[color] / denom).min(cfg.max_bonus_spec);

                    // Early mono-color lean is over-rewarding; damp it.
                    if tracker.pressured_colors() == 1 {
                        bias /= cfg.single_color_bias_factor;
                    }

                    // Committed to one color: cards in the runner-up color
                    // are speculative second-color support and get a floor.
                    if tracker.committed_colors() == 1 && color == tracker.top_two().1 {
                        bias = bias.max(cfg.second_color_fraction * cfg.max_bonus_spec);
                    }

                    Ok(bias)
                }
                // 2-3 colors: reward on-color pips, punish off-color splash.
                _ => {
                    let mut bias = -cfg.multicolor_penalty;
                    for i in 0..NUM_COLORS {
                        if colors[i] > 0.0 {
                            bias += pressure[i];
                        } else {
                            bias -= pressure[i];
                        }
                    }
                    Ok(bias)
                }
            },

            // Committed phase: two colors locked in, everything reduces to
            // off-color symbol counting.
            2 => {
                let (first, second) = tracker.top_two();
                let off_color_pips: f64 = (0..NUM_COLORS)
                    .filter(|&c| c != first && c != second)
                    .map(|c| colors[c])
                    .sum();
                if off_color_pips == 0.0 {
                    Ok(cfg.on_color_bonus)
                } else {
                    Ok(1.0 - off_color_pips * cfg.off_color_penalty)
                }
            }

            _ => Err(EvalError::DegenerateCommitment {
                card: card.to_string(),
                commitment: *pressure,
                pick_index: tracker.picks_made(),
            }),
        }
    }
}

/// Rank pack slots by score, best first, with a deterministic tie-break
/// chain: score descending, then base rating descending, then original
/// pack-slot order.
pub fn rank_slots(scores: &[f64], base_ratings: &[f64]) -> Vec<usize> {
    debug_assert_eq!(scores.len(), base_ratings.len());
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                base_ratings[b]
                    .partial_cmp(&base_ratings[a])
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then(a.cmp(&b))
    });
    order
}
