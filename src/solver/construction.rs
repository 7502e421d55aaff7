//! Nearest-Neighbor tour construction.

use crate::error::{SolverError, SolverResult};
use crate::geometry::DistanceMatrix;

/// Build a tour greedily from `start`, always extending to the closest
/// unvisited city. Ties go to the lowest index.
///
/// # Errors
///
/// Returns [`SolverError::InvalidStart`] if `start` is not a city index.
pub fn nearest_neighbor(matrix: &DistanceMatrix, start: usize) -> SolverResult<Vec<usize>> {
    let n = matrix.len();
    if start >= n {
        return Err(SolverError::InvalidStart { start, n });
    }

    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    tour.push(start);
    visited[start] = true;
    let mut current = start;

    while tour.len() < n {
        let mut best_next = None;
        let mut best_dist = f64::INFINITY;

        // Strict `<` in index order keeps the lowest index on ties; the first
        // unvisited city is always taken so an `inf` distance cannot stall
        for i in 0..n {
            if !visited[i] {
                let d = matrix.get(current, i);
                if best_next.is_none() || d < best_dist {
                    best_dist = d;
                    best_next = Some(i);
                }
            }
        }

        let Some(next) = best_next else { break };
        tour.push(next);
        visited[next] = true;
        current = next;
    }

    Ok(tour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::City;

    fn matrix(points: &[(f64, f64)]) -> DistanceMatrix {
        let cities: Vec<City> = points.iter().copied().map(City::from).collect();
        DistanceMatrix::new(&cities)
    }

    #[test]
    fn test_single_city() {
        let m = matrix(&[(5.0, 5.0)]);
        assert_eq!(nearest_neighbor(&m, 0).unwrap(), vec![0]);
    }

    #[test]
    fn test_follows_nearest() {
        // 0 at origin, 2 is closest, then 1, then 3
        let m = matrix(&[(0.0, 0.0), (5.0, 0.0), (1.0, 0.0), (20.0, 0.0)]);
        assert_eq!(nearest_neighbor(&m, 0).unwrap(), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_tie_breaks_by_lowest_index() {
        // Cities 1 and 3 are both at distance 1 from 0
        let m = matrix(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert_eq!(nearest_neighbor(&m, 0).unwrap(), vec![0, 1, 2, 3]);
        // From 2, cities 1 and 3 tie again
        assert_eq!(nearest_neighbor(&m, 2).unwrap(), vec![2, 1, 0, 3]);
    }

    #[test]
    fn test_duplicate_coordinates_picked_first() {
        let m = matrix(&[(0.0, 0.0), (3.0, 0.0), (0.0, 0.0), (0.0, 0.0)]);
        assert_eq!(nearest_neighbor(&m, 0).unwrap(), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_start_out_of_range() {
        let m = matrix(&[(0.0, 0.0), (1.0, 0.0)]);
        let err = nearest_neighbor(&m, 2).unwrap_err();
        assert!(matches!(err, SolverError::InvalidStart { start: 2, n: 2 }));

        let empty = DistanceMatrix::new(&[]);
        assert!(nearest_neighbor(&empty, 0).is_err());
    }

    #[test]
    fn test_infinite_distances_still_visit_every_city() {
        let cities = [
            City::new(1e308, 0.0),
            City::new(-1e308, 0.0),
            City::new(1e308, 1.0),
        ];
        let m = DistanceMatrix::new(&cities);
        assert!(m.get(0, 1).is_infinite());

        let tour = nearest_neighbor(&m, 0).unwrap();
        assert_eq!(tour, vec![0, 2, 1]);
        assert_eq!(nearest_neighbor(&m, 1).unwrap(), vec![1, 0, 2]);
    }

    #[test]
    fn test_visits_every_city_once() {
        let points: Vec<(f64, f64)> = (0..25)
            .map(|i| (f64::from(i * 7 % 11), f64::from(i * 3 % 13)))
            .collect();
        let m = matrix(&points);
        for start in [0, 7, 24] {
            let mut tour = nearest_neighbor(&m, start).unwrap();
            assert_eq!(tour[0], start);
            tour.sort_unstable();
            assert_eq!(tour, (0..25).collect::<Vec<_>>());
        }
    }
}
