//! Tunable constants for the rating-based pick policies.
//!
//! The thresholds and bonus fractions that drive color commitment and the
//! color-bias computation are collected into one configuration struct so
//! tests can override them deterministically.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for [`ColorCommitmentTracker`](crate::draft::ColorCommitmentTracker)
/// and [`PickEvaluator`](crate::draft::PickEvaluator).
///
/// Defaults mirror the production drafting heuristics.
///
/// # Example
/// ```
/// use draft_eval::draft::BotConfig;
///
/// let config = BotConfig::default();
/// assert_eq!(config.color_commit_threshold, 3.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Baseline playability rating. Cards rated at or below this contribute
    /// no color pressure.
    pub rating_threshold: f64,

    /// Accumulated pressure a color needs before the drafter counts as
    /// committed to it.
    pub color_commit_threshold: f64,

    /// Maximum color bonus during the speculation phase.
    pub max_bonus_spec: f64,

    /// Bonus for fully on-color cards once the drafter has settled into two
    /// colors.
    pub on_color_bonus: f64,

    /// Penalty per off-color mana symbol once the drafter has settled into
    /// two colors.
    pub off_color_penalty: f64,

    /// Bias divisor applied while the drafter has pressure in only a single
    /// color.
    pub single_color_bias_factor: f64,

    /// When committed to exactly one color, cards in the second-highest
    /// pressure color are floored at this fraction of `max_bonus_spec`.
    pub second_color_fraction: f64,

    /// Flat penalty for multicolored (2-3 color) cards.
    pub multicolor_penalty: f64,

    /// Picks beyond one full pack after which the drafter is forced onto
    /// two colors regardless of accumulated pressure.
    pub commit_pick_offset: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            rating_threshold: 2.0,
            color_commit_threshold: 3.5,
            max_bonus_spec: 0.9,
            on_color_bonus: 2.0,
            off_color_penalty: 1.0,
            single_color_bias_factor: 2.0,
            second_color_fraction: 0.8,
            multicolor_penalty: 0.6,
            commit_pick_offset: 5,
        }
    }
}

impl BotConfig {
    /// Create a new BotConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Builder method: set the playability rating threshold.
    pub fn with_rating_threshold(mut self, value: f64) -> Self {
        self.rating_threshold = value;
        self
    }

    /// Builder method: set the color commitment threshold.
    pub fn with_color_commit_threshold(mut self, value: f64) -> Self {
        self.color_commit_threshold = value;
        self
    }

    /// Builder method: set the maximum speculation bonus.
    pub fn with_max_bonus_spec(mut self, value: f64) -> Self {
        self.max_bonus_spec = value;
        self
    }

    /// Builder method: set the forced-commitment pick offset.
    pub fn with_commit_pick_offset(mut self, value: usize) -> Self {
        self.commit_pick_offset = value;
        self
    }

    /// Denominator converting accumulated pressure into a speculation bonus.
    ///
    /// A color at exactly `color_commit_threshold` pressure maps to the full
    /// `max_bonus_spec` bonus.
    pub fn speculation_denom(&self) -> f64 {
        self.color_commit_threshold / self.max_bonus_spec
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, f64); 5] = [
            ("color_commit_threshold", self.color_commit_threshold),
            ("max_bonus_spec", self.max_bonus_spec),
            ("single_color_bias_factor", self.single_color_bias_factor),
            ("on_color_bonus", self.on_color_bonus),
            ("off_color_penalty", self.off_color_penalty),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive(name, value));
            }
        }

        if !(0.0..=1.0).contains(&self.second_color_fraction) {
            return Err(ConfigError::OutOfRange(
                "second_color_fraction",
                self.second_color_fraction,
            ));
        }
        if self.multicolor_penalty < 0.0 {
            return Err(ConfigError::OutOfRange(
                "multicolor_penalty",
                self.multicolor_penalty,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur when validating or loading a [`BotConfig`].
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// A threshold or factor that must be strictly positive was not.
    NonPositive(&'static str, f64),
    /// A fraction or penalty is outside its valid range.
    OutOfRange(&'static str, f64),
    /// Configuration file could not be read.
    Io(String),
    /// Configuration file could not be parsed.
    Json(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositive(name, value) => {
                write!(f, "{} must be positive, got {}", name, value)
            }
            ConfigError::OutOfRange(name, value) => {
                write!(f, "{} is out of range: {}", name, value)
            }
            ConfigError::Io(e) => write!(f, "failed to read config file: {}", e),
            ConfigError::Json(e) => write!(f, "failed to parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(BotConfig::default().validate().is_ok());
    }

    #[test]
    fn test_speculation_denom() {
        let config = BotConfig::default();
        // 3.5 / 0.9: full pressure maps to the full speculation bonus.
        let denom = config.speculation_denom();
        assert!((config.color_commit_threshold / denom - config.max_bonus_spec).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_non_positive_threshold() {
        let config = BotConfig::default().with_color_commit_threshold(0.0);
        match config.validate() {
            Err(ConfigError::NonPositive(name, _)) => {
                assert_eq!(name, "color_commit_threshold")
            }
            other => panic!("expected NonPositive, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_overrides() {
        let config = BotConfig::default()
            .with_rating_threshold(1.0)
            .with_commit_pick_offset(3);
        assert_eq!(config.rating_threshold, 1.0);
        assert_eq!(config.commit_pick_offset, 3);
    }
}
