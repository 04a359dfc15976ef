//! Nearest-Neighbor execution.

use log::debug;

use super::config::NnConfig;
use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;

/// Result of a Nearest-Neighbor run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NnResult {
    /// Best tour found, beginning at its start city (return implied).
    pub tour: Option<Vec<usize>>,
    /// Closed cost of `tour`.
    pub cost: Option<f64>,
    /// Start city of `tour`.
    pub start_city: Option<usize>,
    /// Cost obtained from each tried start, in the order tried.
    /// `None` where the greedy walk got stuck on missing edges.
    pub start_costs: Vec<(usize, Option<f64>)>,
}

impl NnResult {
    /// Number of starts tried.
    pub fn tours_evaluated(&self) -> usize {
        self.start_costs.len()
    }
}

/// Nearest-Neighbor heuristic runner.
pub struct NnRunner;

impl NnRunner {
    /// Builds greedy tours as configured and returns the cheapest.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::matrix::DistanceMatrix;
    /// use u_tsp::nearest_neighbor::{NnConfig, NnRunner};
    ///
    /// let m = DistanceMatrix::new(vec![
    ///     vec![0.0, 1.0, 4.0],
    ///     vec![1.0, 0.0, 2.0],
    ///     vec![4.0, 2.0, 0.0],
    /// ]).unwrap();
    /// let result = NnRunner::run(&m, &NnConfig::default()).unwrap();
    /// assert_eq!(result.tour, Some(vec![0, 1, 2]));
    /// assert_eq!(result.cost, Some(7.0));
    /// ```
    pub fn run(matrix: &DistanceMatrix, config: &NnConfig) -> Result<NnResult> {
        let n = matrix.len();
        config.validate(n).map_err(TspError::InvalidInput)?;
        let starts: Vec<usize> = if config.multi_start {
            (0..n).collect()
        } else {
            vec![config.start_city]
        };

        let mut result = NnResult {
            tour: None,
            cost: None,
            start_city: None,
            start_costs: Vec::with_capacity(starts.len()),
        };

        for start in starts {
            let walk = greedy_tour(matrix, start);
            result
                .start_costs
                .push((start, walk.as_ref().map(|(_, cost)| *cost)));
            if let Some((tour, cost)) = walk {
                if result.cost.map_or(true, |best| cost < best) {
                    result.cost = Some(cost);
                    result.tour = Some(tour);
                    result.start_city = Some(start);
                }
            }
        }

        debug!(
            "nearest neighbor finished: n={n}, starts={}, best={:?}",
            result.tours_evaluated(),
            result.cost
        );

        Ok(result)
    }
}

/// Greedy walk from `start`. `None` if it reaches a dead end.
pub(crate) fn greedy_tour(matrix: &DistanceMatrix, start: usize) -> Option<(Vec<usize>, f64)> {
    let n = matrix.len();
    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);
    let mut current = start;
    let mut total = 0.0;

    visited[current] = true;
    tour.push(current);

    for _ in 1..n {
        let mut nearest = None;
        let mut nearest_cost = f64::INFINITY;
        for (j, &d) in matrix.row(current).iter().enumerate() {
            if !visited[j] && d < nearest_cost {
                nearest_cost = d;
                nearest = Some(j);
            }
        }
        let next = nearest?;
        total += nearest_cost;
        visited[next] = true;
        tour.push(next);
        current = next;
    }

    let back = matrix.get(current, start);
    if !back.is_finite() {
        return None;
    }
    Some((tour, total + back))
}
