//! 2-Opt local search.
//!
//! # Move
//!
//! ```text
//! Remove (t[i], t[i+1]) and (t[j], t[j+1]); add (t[i], t[j]) and (t[i+1], t[j+1])
//! Δ = d(t[i], t[j]) + d(t[i+1], t[j+1]) - d(t[i], t[i+1]) - d(t[j], t[j+1])
//! ```
//!
//! Applying the move reverses `t[i+1..=j]`. A move is taken only when
//! `Δ < -epsilon`, so every applied move strictly shortens the tour and the
//! search terminates at a 2-opt local optimum (or at the pass cap).

use serde::{Deserialize, Serialize};

use crate::config::TwoOptConfig;
use crate::geometry::DistanceMatrix;

/// Which improving move a pass applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImprovementStrategy {
    /// Apply every improving move as soon as it is found.
    #[default]
    FirstImprovement,
    /// Apply only the most improving move of each full scan.
    BestImprovement,
}

/// Counters from one 2-opt run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoOptStats {
    /// Neighbourhood scans performed.
    pub passes: u64,
    /// Moves applied.
    pub improvements: u64,
    /// False if the pass cap stopped the search before a local optimum.
    pub converged: bool,
}

/// Length change of the 2-opt move on edges `(i, i+1)` and `(j, j+1)`.
/// Negative means the move shortens the tour.
///
/// Requires `i < j < tour.len()`; `j + 1` wraps to the start.
#[must_use]
#[inline]
pub fn move_delta(matrix: &DistanceMatrix, tour: &[usize], i: usize, j: usize) -> f64 {
    let n = tour.len();
    let a = tour[i];
    let b = tour[i + 1];
    let c = tour[j];
    let d = tour[(j + 1) % n];

    matrix.get(a, c) + matrix.get(b, d) - matrix.get(a, b) - matrix.get(c, d)
}

/// Configured 2-opt optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoOpt {
    strategy: ImprovementStrategy,
    epsilon: f64,
    max_passes: u64,
}

impl Default for TwoOpt {
    fn default() -> Self {
        Self::from_config(&TwoOptConfig::default())
    }
}

impl TwoOpt {
    /// Build from configuration.
    #[must_use]
    pub fn from_config(config: &TwoOptConfig) -> Self {
        Self {
            strategy: config.strategy,
            epsilon: config.epsilon,
            max_passes: config.max_passes,
        }
    }

    /// Improvement threshold.
    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Improve `tour` in place until no move beats `epsilon` or the pass cap
    /// is reached.
    pub fn optimize(&self, matrix: &DistanceMatrix, tour: &mut [usize]) -> TwoOptStats {
        let mut stats = TwoOptStats {
            converged: true,
            ..TwoOptStats::default()
        };
        if tour.len() < 4 {
            return stats;
        }

        loop {
            if stats.passes >= self.max_passes {
                stats.converged = false;
                log::trace!(
                    "2-opt pass cap {} reached after {} improvements",
                    self.max_passes,
                    stats.improvements
                );
                break;
            }
            stats.passes += 1;

            let applied = match self.strategy {
                ImprovementStrategy::FirstImprovement => self.first_improvement_pass(matrix, tour),
                ImprovementStrategy::BestImprovement => {
                    u64::from(self.best_improvement_pass(matrix, tour))
                }
            };
            stats.improvements += applied;

            if applied == 0 {
                break;
            }
        }

        stats
    }

    /// Scan all moves, applying each improving one immediately.
    /// Returns the number of moves applied.
    fn first_improvement_pass(&self, matrix: &DistanceMatrix, tour: &mut [usize]) -> u64 {
        let n = tour.len();
        let mut applied = 0;

        for i in 0..(n - 2) {
            for j in (i + 2)..n {
                // Edges (0, 1) and (n-1, 0) share city tour[0]
                if i == 0 && j == n - 1 {
                    continue;
                }
                if move_delta(matrix, tour, i, j) < -self.epsilon {
                    tour[i + 1..=j].reverse();
                    applied += 1;
                }
            }
        }

        applied
    }

    /// Scan all moves, then apply the single best one.
    /// Returns true if a move was applied.
    fn best_improvement_pass(&self, matrix: &DistanceMatrix, tour: &mut [usize]) -> bool {
        let n = tour.len();
        let mut best_delta = -self.epsilon;
        let mut best_move = None;

        for i in 0..(n - 2) {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let delta = move_delta(matrix, tour, i, j);
                if delta < best_delta {
                    best_delta = delta;
                    best_move = Some((i, j));
                }
            }
        }

        match best_move {
            Some((i, j)) => {
                tour[i + 1..=j].reverse();
                true
            }
            None => false,
        }
    }
}
