//! # tour-solver
//!
//! Approximate Euclidean Traveling Salesman tours for interactive use.
//!
//! The solver builds a tour with the Nearest-Neighbor heuristic from several
//! starting cities, refines each one with 2-Opt local search, and keeps the
//! shortest:
//! - Deterministic: sampled restarts are driven by a seeded PCG generator
//! - Pure: the input is borrowed, a fresh [`Solution`] is returned
//! - Checked: non-finite coordinates are rejected before any work is done
//!
//! ## Example
//!
//! ```rust
//! use tour_solver::prelude::*;
//!
//! let cities = vec![
//!     City::new(0.0, 0.0),
//!     City::new(1.0, 0.0),
//!     City::new(1.0, 1.0),
//!     City::new(0.0, 1.0),
//! ];
//!
//! let solution = tour_solver::solve(&cities).unwrap();
//! assert_eq!(solution.tour.len(), 4);
//! assert!((solution.length - 4.0).abs() < 1e-12);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Index loops mirror the 2-opt move notation
)]

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod solver;
pub mod tour;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{SolverConfig, SolverConfigBuilder, TwoOptConfig};
    pub use crate::engine::rng::SolverRng;
    pub use crate::error::{SolverError, SolverResult};
    pub use crate::geometry::{City, DistanceMatrix};
    pub use crate::solver::restart::RestartPolicy;
    pub use crate::solver::two_opt::ImprovementStrategy;
    pub use crate::solver::{Solution, SolveReport, TourSolver};
    pub use crate::tour::Tour;
}

/// Re-export for public API
pub use error::{SolverError, SolverResult};
pub use solver::{solve, Solution, SolveReport, TourSolver};
