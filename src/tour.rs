//! Validated cyclic tours.
//!
//! A [`Tour`] is a permutation of `0..n` read as a cycle: the last city
//! connects back to the first.

use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};
use crate::geometry::{City, DistanceMatrix};
use crate::solver::two_opt;

/// Visiting order over city indices; always a permutation of `0..n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Wrap an index sequence after checking it is a permutation of
    /// `0..order.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidTour`] on an out-of-range or repeated
    /// index.
    pub fn new(order: Vec<usize>) -> SolverResult<Self> {
        let n = order.len();
        let mut seen = vec![false; n];
        for &city in &order {
            if city >= n {
                return Err(SolverError::invalid_tour(format!(
                    "index {city} out of range for {n} cities"
                )));
            }
            if seen[city] {
                return Err(SolverError::invalid_tour(format!(
                    "index {city} appears more than once"
                )));
            }
            seen[city] = true;
        }
        Ok(Self(order))
    }

    /// Identity tour `0, 1, .., n-1`.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Construction and 2-opt only ever permute, so their output skips the
    /// permutation check. `n` is the number of cities the order must cover.
    pub(crate) fn from_permutation(order: Vec<usize>, n: usize) -> Self {
        debug_assert_eq!(order.len(), n, "tour must cover all {n} cities");
        debug_assert!(Self::new(order.clone()).is_ok());
        Self(order)
    }

    /// Fail unless this tour visits exactly `n` cities.
    fn check_covers(&self, n: usize) -> SolverResult<()> {
        if self.0.len() == n {
            Ok(())
        } else {
            Err(SolverError::invalid_tour(format!(
                "tour visits {} cities but {n} were given",
                self.0.len()
            )))
        }
    }

    /// Number of cities in the tour.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tour visits no cities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indices in visiting order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Consume the tour, returning its indices.
    #[must_use]
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    /// Iterate over indices in visiting order.
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    /// Closed edges `(tour[i], tour[i+1 mod n])`, including the return edge.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.0.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| (self.0[i], self.0[(i + 1) % n]))
    }

    /// Closed tour length under `matrix`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidTour`] if the tour and the matrix cover
    /// a different number of cities.
    pub fn length(&self, matrix: &DistanceMatrix) -> SolverResult<f64> {
        self.check_covers(matrix.len())?;
        Ok(matrix.tour_length(&self.0))
    }

    /// Check if no single 2-opt move shortens the tour by more than `epsilon`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidTour`] on a tour/matrix size mismatch.
    pub fn is_two_opt_optimal(
        &self,
        matrix: &DistanceMatrix,
        epsilon: f64,
    ) -> SolverResult<bool> {
        self.check_covers(matrix.len())?;
        let n = self.0.len();
        if n < 4 {
            return Ok(true);
        }

        for i in 0..(n - 2) {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                if two_opt::move_delta(matrix, &self.0, i, j) < -epsilon {
                    return Ok(false);
                }
            }
        }

        Ok(true)
    }

    /// Count proper crossings between non-adjacent edges.
    /// A 2-opt optimal Euclidean tour has none.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidTour`] if `cities` is not the set the
    /// tour was built over.
    pub fn count_crossings(&self, cities: &[City]) -> SolverResult<usize> {
        self.check_covers(cities.len())?;
        let n = self.0.len();
        if n < 4 {
            return Ok(0);
        }

        let mut crossings = 0;
        for i in 0..n {
            let p1 = &cities[self.0[i]];
            let p2 = &cities[self.0[(i + 1) % n]];

            for j in (i + 2)..n {
                let j_next = (j + 1) % n;
                // Shares a city with edge i
                if j_next == i {
                    continue;
                }

                let p3 = &cities[self.0[j]];
                let p4 = &cities[self.0[j_next]];
                if segments_intersect(p1, p2, p3, p4) {
                    crossings += 1;
                }
            }
        }

        Ok(crossings)
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = SolverError;

    fn try_from(order: Vec<usize>) -> SolverResult<Self> {
        Self::new(order)
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.0
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether segment p1-p2 properly crosses segment p3-p4 (cross product test;
/// touching or collinear segments do not count).
fn segments_intersect(p1: &City, p2: &City, p3: &City, p4: &City) -> bool {
    fn cross(o: &City, a: &City, b: &City) -> f64 {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    }

    let d1 = cross(p3, p4, p1);
    let d2 = cross(p3, p4, p2);
    let d3 = cross(p1, p2, p3);
    let d4 = cross(p1, p2, p4);

    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}
