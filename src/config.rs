//! Configuration options for the search agents
//!
//! Every tuning constant used by the value formulas and rollout policies
//! lives here so that a single struct describes an agent's behaviour.

use crate::{HexError, Result};

/// Configuration for the MCTS agents
///
/// Use the builder methods to create a customized configuration.
///
/// # Example
///
/// ```
/// use hex_mcts::MctsConfig;
///
/// let config = MctsConfig::default()
///     .with_exploration(0.7)
///     .with_rave_const(500.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Weight of the exploration term during selection.
    ///
    /// Zero turns selection into pure exploitation.
    pub exploration: f64,

    /// Visit count at which RAVE stops trusting AMAF statistics.
    pub rave_const: f64,

    /// Probability of following the stored reply (Last-Good-Reply) or the
    /// pool (Pool-RAVE) instead of a uniform random move.
    pub randomness: f64,

    /// Maximum number of cells in each colour's Pool-RAVE pool.
    pub pool_rave_capacity: usize,

    /// Steepness of the quality-based sigmoid bonus.
    pub k_const: f64,

    /// Scale of the quality-based bonus relative to the raw reward.
    pub a_const: f64,

    /// Moves a player must have made in a rollout before the quality
    /// bonus is applied.
    pub warmup_rollouts: usize,

    /// Number of rollout lengths the quality-based agent remembers.
    pub quality_history_capacity: usize,

    /// Seed for the agent's random source. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        MctsConfig {
            exploration: 0.5,
            rave_const: 300.0,
            randomness: 0.5,
            pool_rave_capacity: 10,
            k_const: 10.0,
            a_const: 0.25,
            warmup_rollouts: 7,
            quality_history_capacity: 10_000,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Sets the exploration weight
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Sets the RAVE equivalence constant
    pub fn with_rave_const(mut self, rave_const: f64) -> Self {
        self.rave_const = rave_const;
        self
    }

    /// Sets the reply / pool follow probability
    pub fn with_randomness(mut self, randomness: f64) -> Self {
        self.randomness = randomness;
        self
    }

    /// Sets the Pool-RAVE pool size
    pub fn with_pool_rave_capacity(mut self, capacity: usize) -> Self {
        self.pool_rave_capacity = capacity;
        self
    }

    /// Sets the quality-based sigmoid steepness
    pub fn with_k_const(mut self, k: f64) -> Self {
        self.k_const = k;
        self
    }

    /// Sets the quality-based bonus scale
    pub fn with_a_const(mut self, a: f64) -> Self {
        self.a_const = a;
        self
    }

    /// Sets the quality-based warm-up move count
    pub fn with_warmup_rollouts(mut self, warmup: usize) -> Self {
        self.warmup_rollouts = warmup;
        self
    }

    /// Sets how many rollout lengths the quality-based agent keeps
    pub fn with_quality_history_capacity(mut self, capacity: usize) -> Self {
        self.quality_history_capacity = capacity;
        self
    }

    /// Fixes the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that every constant is usable.
    pub fn validate(&self) -> Result<()> {
        fn non_negative(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(HexError::InvalidConfiguration(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )))
            }
        }

        non_negative("exploration", self.exploration)?;
        non_negative("k_const", self.k_const)?;
        non_negative("a_const", self.a_const)?;

        if !(self.rave_const.is_finite() && self.rave_const > 0.0) {
            return Err(HexError::InvalidConfiguration(format!(
                "rave_const must be positive, got {}",
                self.rave_const
            )));
        }
        if !(0.0..=1.0).contains(&self.randomness) {
            return Err(HexError::InvalidConfiguration(format!(
                "randomness must lie in [0, 1], got {}",
                self.randomness
            )));
        }
        if self.pool_rave_capacity == 0 {
            return Err(HexError::InvalidConfiguration(
                "pool_rave_capacity must be at least 1".to_string(),
            ));
        }
        if self.quality_history_capacity == 0 {
            return Err(HexError::InvalidConfiguration(
                "quality_history_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
