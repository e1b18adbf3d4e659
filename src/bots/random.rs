//! Uniform-random baseline policy.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::draft::evaluator::EvalError;
use crate::draft::policy::PickPolicy;

/// Ranks every pack in uniformly random order.
///
/// The accuracy floor every real policy has to beat. Seedable for
/// reproducible runs.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Create a policy with an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a policy with a fixed seed for reproducible rankings.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl PickPolicy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn rank(&mut self, pack: &[String], _collection: &[String]) -> Result<Vec<usize>, EvalError> {
        let mut order: Vec<usize> = (0..pack.len()).collect();
        order.shuffle(&mut self.rng);
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("card{}", i)).collect()
    }

    #[test]
    fn test_rank_is_a_permutation() {
        let mut policy = RandomPolicy::seeded(7);
        let mut order = policy.rank(&pack(15), &[]).unwrap();
        order.sort_unstable();
        assert_eq!(order, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_rankings() {
        let mut a = RandomPolicy::seeded(42);
        let mut b = RandomPolicy::seeded(42);
        for n in [15, 14, 13] {
            assert_eq!(a.rank(&pack(n), &[]).unwrap(), b.rank(&pack(n), &[]).unwrap());
        }
    }
}
