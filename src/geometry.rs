//! Cities, Euclidean distances and input validation.
//!
//! # Governing Equations
//!
//! ```text
//! Distance:     d(a, b) = √((aₓ - bₓ)² + (a_y - b_y)²)
//! Tour Length:  L(π) = Σᵢ d(π(i), π(i+1)) + d(π(n), π(1))
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};

/// A 2D point representing a city.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    /// Create a new city at coordinates (x, y).
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another city.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for City {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Reject any city with a NaN or infinite coordinate.
///
/// # Errors
///
/// Returns [`SolverError::InvalidInput`] for the first offending city.
pub fn validate_cities(cities: &[City]) -> SolverResult<()> {
    match cities.iter().position(|c| !c.is_finite()) {
        Some(index) => Err(SolverError::InvalidInput {
            index,
            x: cities[index].x,
            y: cities[index].y,
        }),
        None => Ok(()),
    }
}

/// Symmetric pairwise distance matrix, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Precompute all pairwise distances for O(1) lookups.
    #[must_use]
    pub fn new(cities: &[City]) -> Self {
        let n = cities.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Validate the cities, then build the matrix.
    ///
    /// Every closed tour is at most `n` times the widest pairwise distance,
    /// so keeping that product finite keeps tour lengths and 2-opt deltas
    /// finite as well.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidInput`] if any coordinate is non-finite,
    /// or if the cities are spread so wide that a tour length could overflow
    /// `f64`. The second case names the later city of the widest pair.
    pub fn try_new(cities: &[City]) -> SolverResult<Self> {
        validate_cities(cities)?;
        let matrix = Self::new(cities);

        let n = matrix.n;
        let mut widest: Option<(usize, f64)> = None;
        for j in 1..n {
            for i in 0..j {
                let d = matrix.get(i, j);
                if widest.map_or(true, |(_, w)| d > w) {
                    widest = Some((j, d));
                }
            }
        }

        match widest {
            Some((index, d)) if !(d * n as f64).is_finite() => Err(SolverError::InvalidInput {
                index,
                x: cities[index].x,
                y: cities[index].y,
            }),
            _ => Ok(matrix),
        }
    }

    /// Number of cities.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix covers no cities.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between cities `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Length of the closed tour visiting `order` and returning to its start.
    ///
    /// Fewer than two cities have length 0; two cities count the edge twice.
    #[must_use]
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }

        let mut length = 0.0;
        for i in 0..order.len() {
            let j = (i + 1) % order.len();
            length += self.get(order[i], order[j]);
        }
        length
    }
}
