//! Solver runtime support.
//!
//! Currently only the seeded RNG used by sampled restart schedules.

pub mod rng;

pub use rng::SolverRng;
