//! Multi-start Nearest-Neighbor + 2-Opt tour solver.
//!
//! # Algorithm
//!
//! ```text
//! for s in restart_schedule(n):
//!     t   = nearest_neighbor(s)
//!     t   = two_opt(t)              (unless disabled)
//!     keep t if L(t) < L(best)      (first found wins ties)
//! ```
//!
//! Nearest-Neighbor is start-dependent; restarting from several cities and
//! cleaning each tour with 2-opt avoids most unlucky starts without the cost
//! of an exact method.

pub mod construction;
pub mod restart;
pub mod two_opt;

use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::geometry::{City, DistanceMatrix};
use crate::tour::Tour;

use construction::nearest_neighbor;
use two_opt::{TwoOpt, TwoOptStats};

/// Solve with the default configuration: every city as a start, first
/// improvement 2-opt.
///
/// # Errors
///
/// Returns [`crate::SolverError::InvalidInput`] if any coordinate is
/// non-finite.
pub fn solve(cities: &[City]) -> SolverResult<Solution> {
    TourSolver::default().solve(cities)
}

/// Best tour found by a solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Visiting order, a permutation of `0..n`.
    pub tour: Tour,
    /// Closed tour length.
    pub length: f64,
    /// How the tour was found.
    pub report: SolveReport,
}

impl Solution {
    fn empty() -> Self {
        Self {
            tour: Tour::default(),
            length: 0.0,
            report: SolveReport::default(),
        }
    }

    /// Split into `(indices, length)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<usize>, f64) {
        (self.tour.into_vec(), self.length)
    }
}

/// Diagnostics from one solve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Starting city of the winning tour.
    pub best_start: Option<usize>,
    /// Starting cities in the order they were tried.
    pub starts: Vec<usize>,
    /// Final length of each restart, parallel to `starts`.
    pub restart_lengths: Vec<f64>,
    /// 2-opt passes summed over restarts.
    pub two_opt_passes: u64,
    /// 2-opt moves applied, summed over restarts.
    pub two_opt_improvements: u64,
    /// True if any restart stopped at the 2-opt pass cap.
    pub pass_cap_hit: bool,
}

impl SolveReport {
    /// Number of restarts performed.
    #[must_use]
    pub fn restarts(&self) -> usize {
        self.restart_lengths.len()
    }

    fn record(&mut self, start: usize, length: f64, stats: TwoOptStats) {
        self.starts.push(start);
        self.restart_lengths.push(length);
        self.two_opt_passes += stats.passes;
        self.two_opt_improvements += stats.improvements;
        self.pass_cap_hit |= !stats.converged;
    }

    /// Population variance of restart lengths.
    #[must_use]
    pub fn restart_variance(&self) -> f64 {
        if self.restart_lengths.len() < 2 {
            return 0.0;
        }

        let n = self.restart_lengths.len() as f64;
        let mean: f64 = self.restart_lengths.iter().sum::<f64>() / n;
        self.restart_lengths
            .iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>()
            / n
    }

    /// Coefficient of variation of restart lengths.
    #[must_use]
    pub fn restart_cv(&self) -> f64 {
        if self.restart_lengths.is_empty() {
            return 0.0;
        }

        let mean: f64 =
            self.restart_lengths.iter().sum::<f64>() / self.restart_lengths.len() as f64;
        if mean > f64::EPSILON {
            self.restart_variance().sqrt() / mean
        } else {
            0.0
        }
    }
}

/// Configured tour solver. Holds no per-solve state, so one instance can
/// serve any number of calls.
#[derive(Debug, Clone, PartialEq)]
pub struct TourSolver {
    config: SolverConfig,
    two_opt: TwoOpt,
}

impl Default for TourSolver {
    fn default() -> Self {
        let config = SolverConfig::default();
        let two_opt = TwoOpt::from_config(&config.two_opt);
        Self { config, two_opt }
    }
}

impl TourSolver {
    /// Create a solver from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: SolverConfig) -> SolverResult<Self> {
        config.check()?;
        let two_opt = TwoOpt::from_config(&config.two_opt);
        Ok(Self { config, two_opt })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Compute the best tour over the configured restart schedule.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SolverError::InvalidInput`] if any coordinate is
    /// non-finite.
    pub fn solve(&self, cities: &[City]) -> SolverResult<Solution> {
        let matrix = DistanceMatrix::try_new(cities)?;
        let n = matrix.len();
        if n == 0 {
            return Ok(Solution::empty());
        }

        let starts = self.config.restarts.starts(n);
        let mut report = SolveReport::default();
        let mut best: Option<(Vec<usize>, f64)> = None;

        for &start in &starts {
            let (order, length, stats) = self.run_from(&matrix, start)?;
            log::trace!("restart from {start}: length {length:.6}, {stats:?}");
            report.record(start, length, stats);

            if best.as_ref().map_or(true, |(_, best_len)| length < *best_len) {
                report.best_start = Some(start);
                best = Some((order, length));
            }
        }

        // Every schedule yields at least one start for n >= 1
        let Some((order, length)) = best else {
            return Ok(Solution::empty());
        };

        log::debug!(
            "solved {n} cities over {} restarts: best length {length:.6} from city {:?}",
            report.restarts(),
            report.best_start
        );

        Ok(Solution {
            tour: Tour::from_permutation(order, matrix.len()),
            length,
            report,
        })
    }

    /// Run a single construction + refinement from `start`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SolverError::InvalidInput`] for non-finite
    /// coordinates and [`crate::SolverError::InvalidStart`] if `start` is not
    /// a city index.
    pub fn solve_from(&self, cities: &[City], start: usize) -> SolverResult<Solution> {
        let matrix = DistanceMatrix::try_new(cities)?;
        let (order, length, stats) = self.run_from(&matrix, start)?;

        let mut report = SolveReport {
            best_start: Some(start),
            ..SolveReport::default()
        };
        report.record(start, length, stats);

        Ok(Solution {
            tour: Tour::from_permutation(order, matrix.len()),
            length,
            report,
        })
    }

    fn run_from(
        &self,
        matrix: &DistanceMatrix,
        start: usize,
    ) -> SolverResult<(Vec<usize>, f64, TwoOptStats)> {
        let mut order = nearest_neighbor(matrix, start)?;
        let stats = if self.config.two_opt.enabled {
            self.two_opt.optimize(matrix, &mut order)
        } else {
            TwoOptStats {
                converged: true,
                ..TwoOptStats::default()
            }
        };
        let length = matrix.tour_length(&order);
        Ok((order, length, stats))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::error::SolverError;
    use crate::solver::restart::RestartPolicy;
    use proptest::prelude::*;

    fn scaled_cities(scale: f64) -> impl Strategy<Value = Vec<City>> {
        prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 0..14).prop_map(
            move |pts| {
                pts.into_iter()
                    .map(|(x, y)| City::new(x * scale, y * scale))
                    .collect()
            },
        )
    }

    /// Instances from tiny to very large magnitudes, all with a finite
    /// worst-case tour length.
    fn cities_strategy() -> impl Strategy<Value = Vec<City>> {
        prop_oneof![
            scaled_cities(1.0),
            scaled_cities(1e-150),
            scaled_cities(1e150),
            scaled_cities(1e300),
        ]
    }

    proptest! {
        /// The tour is a permutation of 0..n.
        #[test]
        fn prop_permutation(cities in cities_strategy()) {
            let solution = solve(&cities).unwrap();
            let mut sorted = solution.tour.into_vec();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..cities.len()).collect::<Vec<_>>());
        }

        /// Reported length equals the independently recomputed cycle length.
        #[test]
        fn prop_length_consistent(cities in cities_strategy()) {
            let solution = solve(&cities).unwrap();
            let tour = solution.tour.as_slice();
            let n = tour.len();
            let recomputed: f64 = if n < 2 {
                0.0
            } else {
                (0..n)
                    .map(|i| cities[tour[i]].distance_to(&cities[tour[(i + 1) % n]]))
                    .sum()
            };
            prop_assert!((recomputed - solution.length).abs() <= 1e-9 * recomputed.max(1.0));
            prop_assert!(solution.length.is_finite());
        }

        /// Near the top of the f64 range the solver either returns a full
        /// permutation with a finite length or rejects the input.
        #[test]
        fn prop_extreme_spread_never_degrades(cities in scaled_cities(1e306)) {
            match solve(&cities) {
                Ok(solution) => {
                    let mut sorted = solution.tour.into_vec();
                    sorted.sort_unstable();
                    prop_assert_eq!(sorted, (0..cities.len()).collect::<Vec<_>>());
                    prop_assert!(solution.length.is_finite());
                }
                Err(err) => {
                    prop_assert!(matches!(err, SolverError::InvalidInput { .. }), "{}", err);
                }
            }
        }

        /// No single 2-opt move improves the result.
        #[test]
        fn prop_two_opt_local_optimum(cities in cities_strategy()) {
            let solution = solve(&cities).unwrap();
            let matrix = DistanceMatrix::new(&cities);
            prop_assert!(solution.tour.is_two_opt_optimal(&matrix, 1e-9).unwrap());
        }

        /// Identical input gives identical output.
        #[test]
        fn prop_deterministic(cities in cities_strategy(), seed in 0u64..1000) {
            let solver = TourSolver::new(
                SolverConfig::builder().restarts(RestartPolicy::sampled(seed)).build(),
            ).unwrap();
            prop_assert_eq!(solver.solve(&cities).unwrap(), solver.solve(&cities).unwrap());
        }
    }
}
