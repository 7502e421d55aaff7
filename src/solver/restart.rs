//! Restart schedules: which starting cities the multi-start loop tries.

use serde::{Deserialize, Serialize};

use crate::engine::rng::SolverRng;
use crate::error::{SolverError, SolverResult};

/// Number of sampled starts used when none is configured.
pub const DEFAULT_SAMPLED_STARTS: usize = 5;

/// Policy for choosing restart origins.
///
/// ```yaml
/// restarts:
///   policy: sampled
///   count: 5
///   seed: 42
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum RestartPolicy {
    /// Every city, in index order.
    #[default]
    AllCities,
    /// Cities `0..count` (clamped to `n`).
    First {
        /// Number of starts.
        count: usize,
    },
    /// `count` distinct cities drawn by a seeded shuffle (clamped to `n`).
    Sampled {
        /// Number of starts.
        #[serde(default = "default_sampled_count")]
        count: usize,
        /// Shuffle seed.
        #[serde(default = "default_seed")]
        seed: u64,
    },
}

const fn default_sampled_count() -> usize {
    DEFAULT_SAMPLED_STARTS
}

const fn default_seed() -> u64 {
    42
}

impl RestartPolicy {
    /// Sampled policy with the default number of starts.
    #[must_use]
    pub const fn sampled(seed: u64) -> Self {
        Self::Sampled {
            count: DEFAULT_SAMPLED_STARTS,
            seed,
        }
    }

    /// Check the policy can produce at least one start.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a zero `count`.
    pub fn validate(&self) -> SolverResult<()> {
        match self {
            Self::First { count: 0 } | Self::Sampled { count: 0, .. } => Err(
                SolverError::config("restart count must be at least 1"),
            ),
            _ => Ok(()),
        }
    }

    /// Starting cities for an instance of `n` cities, in the order they are
    /// tried. Always distinct and within `0..n`.
    #[must_use]
    pub fn starts(&self, n: usize) -> Vec<usize> {
        match *self {
            Self::AllCities => (0..n).collect(),
            Self::First { count } => (0..count.min(n)).collect(),
            Self::Sampled { count, seed } => {
                let mut rng = SolverRng::new(seed);
                let mut indices: Vec<usize> = (0..n).collect();
                rng.shuffle(&mut indices);
                indices.truncate(count.min(n));
                indices
            }
        }
    }
}
