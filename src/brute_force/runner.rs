//! Brute-force execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use super::config::BruteForceConfig;
use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;

/// How often (in permutations) the cancel flag is polled.
const CANCEL_POLL_INTERVAL: u64 = 4096;

/// Result of an exhaustive search.
///
/// Tours start at city 0; the return edge is implied. Only tours with a
/// finite cost are considered, so all fields are `None` when no tour
/// exists.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BruteForceResult {
    /// Cheapest tour.
    pub best_tour: Option<Vec<usize>>,
    /// Cost of the cheapest tour.
    pub best_cost: Option<f64>,
    /// Most expensive tour.
    pub worst_tour: Option<Vec<usize>>,
    /// Cost of the most expensive tour.
    pub worst_cost: Option<f64>,
    /// Number of permutations evaluated.
    pub permutations: u64,
    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Exhaustive permutation search.
pub struct BruteForceRunner;

impl BruteForceRunner {
    /// Evaluates every tour starting at city 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::brute_force::{BruteForceConfig, BruteForceRunner};
    /// use u_tsp::matrix::DistanceMatrix;
    ///
    /// let m = DistanceMatrix::new(vec![
    ///     vec![0.0, 10.0, 15.0, 20.0],
    ///     vec![10.0, 0.0, 35.0, 25.0],
    ///     vec![15.0, 35.0, 0.0, 30.0],
    ///     vec![20.0, 25.0, 30.0, 0.0],
    /// ]).unwrap();
    /// let result = BruteForceRunner::run(&m, &BruteForceConfig::default()).unwrap();
    /// assert_eq!(result.best_cost, Some(80.0));
    /// assert_eq!(result.worst_cost, Some(95.0));
    /// ```
    pub fn run(matrix: &DistanceMatrix, config: &BruteForceConfig) -> Result<BruteForceResult> {
        Self::run_with_cancel(matrix, config, None)
    }

    /// Evaluates every tour, stopping early if `cancel` is set.
    ///
    /// A cancelled run reports the best and worst tours seen so far.
    pub fn run_with_cancel(
        matrix: &DistanceMatrix,
        config: &BruteForceConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BruteForceResult> {
        config.validate().map_err(TspError::InvalidInput)?;
        let n = matrix.len();
        if n > config.max_cities {
            return Err(TspError::invalid(format!(
                "{n} cities exceed the brute-force limit of {}",
                config.max_cities
            )));
        }

        let mut result = BruteForceResult {
            best_tour: None,
            best_cost: None,
            worst_tour: None,
            worst_cost: None,
            permutations: 0,
            cancelled: false,
        };

        // Position 0 stays fixed; the tail runs through every ordering.
        let mut route: Vec<usize> = (0..n).collect();
        loop {
            if let Some(ref flag) = cancel {
                if result.permutations % CANCEL_POLL_INTERVAL == 0 && flag.load(Ordering::Relaxed)
                {
                    result.cancelled = true;
                    break;
                }
            }

            result.permutations += 1;
            let cost = closed_route_cost(matrix, &route);
            if cost.is_finite() {
                if result.best_cost.map_or(true, |best| cost < best) {
                    result.best_cost = Some(cost);
                    result.best_tour = Some(route.clone());
                }
                if result.worst_cost.map_or(true, |worst| cost > worst) {
                    result.worst_cost = Some(cost);
                    result.worst_tour = Some(route.clone());
                }
            }

            if n < 2 || !next_permutation(&mut route[1..]) {
                break;
            }
        }

        debug!(
            "brute force finished: n={n}, permutations={}, best={:?}",
            result.permutations, result.best_cost
        );

        Ok(result)
    }
}

fn closed_route_cost(matrix: &DistanceMatrix, route: &[usize]) -> f64 {
    let n = route.len();
    (0..n).map(|k| matrix.get(route[k], route[(k + 1) % n])).sum()
}

/// Advances `items` to the next lexicographic permutation.
///
/// Returns `false` (leaving `items` sorted ascending) after the last one.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        items.reverse();
        return false;
    }
    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}
