//! 2-opt descent.
//!
//! # Algorithm
//!
//! For positions `1 <= i < j < n` of a tour whose position 0 is fixed,
//! reversing `tour[i..=j]` replaces edges `(tour[i-1], tour[i])` and
//! `(tour[j], tour[j+1])` with `(tour[i-1], tour[j])` and
//! `(tour[i], tour[j+1])`. On symmetric matrices that is the whole change:
//!
//! ```text
//! delta = d(p, b) + d(a, q) - d(p, a) - d(b, q)
//! ```
//!
//! On asymmetric matrices the reversed segment is also traversed backwards,
//! so its internal edges are re-priced. Improving reversals are applied
//! immediately (first improvement); passes repeat until one finds nothing.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::config::{InitialTour, TwoOptConfig};
use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;
use crate::nearest_neighbor::greedy_tour;

/// Smallest gain accepted as an improvement.
const IMPROVEMENT_EPS: f64 = 1e-10;

/// Result of a 2-opt run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptResult {
    /// Best 2-optimal tour, beginning at its start city (return implied).
    pub tour: Option<Vec<usize>>,
    /// Closed cost of `tour`.
    pub cost: Option<f64>,
    /// Start city of `tour`.
    pub start_city: Option<usize>,
    /// Cost of the starting tour that `tour` was improved from.
    pub initial_cost: Option<f64>,
    /// Final cost per tried start, in the order tried.
    /// `None` where no starting tour without missing edges was available.
    pub start_costs: Vec<(usize, Option<f64>)>,
    /// Improvement passes over all descents.
    pub passes: usize,
    /// Applied reversals over all descents.
    pub improvements: usize,
}

impl TwoOptResult {
    fn empty(starts: usize) -> Self {
        Self {
            tour: None,
            cost: None,
            start_city: None,
            initial_cost: None,
            start_costs: Vec::with_capacity(starts),
            passes: 0,
            improvements: 0,
        }
    }

    /// Number of starts tried.
    pub fn tours_evaluated(&self) -> usize {
        self.start_costs.len()
    }

    fn record(&mut self, start: usize, initial_cost: f64, descent: Descent) {
        self.start_costs.push((start, Some(descent.cost)));
        self.passes += descent.passes;
        self.improvements += descent.improvements;
        if self.cost.map_or(true, |best| descent.cost < best) {
            self.cost = Some(descent.cost);
            self.tour = Some(descent.tour);
            self.start_city = Some(start);
            self.initial_cost = Some(initial_cost);
        }
    }
}

struct Descent {
    tour: Vec<usize>,
    cost: f64,
    passes: usize,
    improvements: usize,
}

/// 2-opt local search runner.
pub struct TwoOptRunner;

impl TwoOptRunner {
    /// Builds starting tours as configured, improves each to a 2-optimum and
    /// returns the cheapest.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::matrix::random;
    /// use u_tsp::two_opt::{TwoOptConfig, TwoOptRunner};
    ///
    /// let m = random::euclidean(12, 3).unwrap();
    /// let result = TwoOptRunner::run(&m, &TwoOptConfig::default().with_seed(1)).unwrap();
    /// assert!(result.cost.unwrap() <= result.initial_cost.unwrap());
    /// ```
    pub fn run(matrix: &DistanceMatrix, config: &TwoOptConfig) -> Result<TwoOptResult> {
        let n = matrix.len();
        config.validate(n).map_err(TspError::InvalidInput)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let symmetric = matrix.is_symmetric();

        let starts: Vec<usize> = if config.multi_start {
            (0..n).collect()
        } else {
            vec![config.start_city]
        };
        let mut result = TwoOptResult::empty(starts.len());

        for start in starts {
            let initial = match config.initial_tour {
                InitialTour::Shuffled => {
                    let mut tour: Vec<usize> = std::iter::once(start)
                        .chain((0..n).filter(|&c| c != start))
                        .collect();
                    tour[1..].shuffle(&mut rng);
                    let cost = closed_cost(matrix, &tour);
                    cost.is_finite().then_some((tour, cost))
                }
                InitialTour::NearestNeighbor => greedy_tour(matrix, start),
            };

            match initial {
                Some((tour, initial_cost)) => {
                    let descent = descend(matrix, tour, config.max_passes, symmetric);
                    result.record(start, initial_cost, descent);
                }
                None => result.start_costs.push((start, None)),
            }
        }

        debug!(
            "2-opt finished: n={n}, starts={}, passes={}, improvements={}, best={:?}",
            result.tours_evaluated(),
            result.passes,
            result.improvements,
            result.cost
        );

        Ok(result)
    }

    /// Improves a given tour to a 2-optimum, keeping `tour[0]` in place.
    ///
    /// Only `config.max_passes` is used. Fails with
    /// [`TspError::InvalidInput`] if `tour` is not a permutation of the
    /// cities or uses a missing edge.
    pub fn improve(
        matrix: &DistanceMatrix,
        tour: &[usize],
        config: &TwoOptConfig,
    ) -> Result<TwoOptResult> {
        let initial_cost = matrix.tour_cost(tour)?;
        if !initial_cost.is_finite() {
            return Err(TspError::invalid("starting tour uses a missing edge"));
        }
        let descent = descend(matrix, tour.to_vec(), config.max_passes, matrix.is_symmetric());
        let mut result = TwoOptResult::empty(1);
        result.record(tour[0], initial_cost, descent);
        Ok(result)
    }
}

fn closed_cost(matrix: &DistanceMatrix, tour: &[usize]) -> f64 {
    let n = tour.len();
    (0..n).map(|k| matrix.get(tour[k], tour[(k + 1) % n])).sum()
}

/// Cost change of reversing `tour[i..=j]`, or `None` if the reversed tour
/// would use a missing edge.
fn reversal_delta(
    matrix: &DistanceMatrix,
    tour: &[usize],
    i: usize,
    j: usize,
    symmetric: bool,
) -> Option<f64> {
    let n = tour.len();
    let (p, a) = (tour[i - 1], tour[i]);
    let (b, q) = (tour[j], tour[(j + 1) % n]);

    let entry = matrix.get(p, b);
    let exit = matrix.get(a, q);
    if !entry.is_finite() || !exit.is_finite() {
        return None;
    }
    let mut delta = entry + exit - matrix.get(p, a) - matrix.get(b, q);

    if !symmetric {
        for k in i..j {
            let (u, v) = (tour[k], tour[k + 1]);
            let backward = matrix.get(v, u);
            if !backward.is_finite() {
                return None;
            }
            delta += backward - matrix.get(u, v);
        }
    }

    Some(delta)
}

/// First-improvement descent. `tour` must have a finite cost.
fn descend(
    matrix: &DistanceMatrix,
    mut tour: Vec<usize>,
    max_passes: usize,
    symmetric: bool,
) -> Descent {
    let n = tour.len();
    let mut passes = 0;
    let mut improvements = 0;

    loop {
        if max_passes > 0 && passes >= max_passes {
            break;
        }
        passes += 1;
        let mut improved = false;

        for i in 1..n.saturating_sub(1) {
            for j in (i + 1)..n {
                if let Some(delta) = reversal_delta(matrix, &tour, i, j, symmetric) {
                    if delta < -IMPROVEMENT_EPS {
                        tour[i..=j].reverse();
                        improvements += 1;
                        improved = true;
                    }
                }
            }
        }

        if !improved {
            break;
        }
    }

    // Recomputed rather than accumulated so rounding drift never leaks out.
    let cost = closed_cost(matrix, &tour);
    Descent {
        tour,
        cost,
        passes,
        improvements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::held_karp::HeldKarpRunner;
    use crate::matrix::random;
    use rand::Rng;

    const INF: f64 = f64::INFINITY;

    fn square() -> DistanceMatrix {
        let pts = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        let data = pts
            .iter()
            .flat_map(|&(xa, ya): &(f64, f64)| {
                pts.iter().map(move |&(xb, yb)| (xa - xb).hypot(ya - yb))
            })
            .collect();
        DistanceMatrix::from_flat(4, data).unwrap()
    }

    fn assert_valid_tour(m: &DistanceMatrix, tour: &[usize], cost: f64) {
        let actual = m.tour_cost(tour).unwrap();
        assert!(actual.is_finite());
        assert!((actual - cost).abs() < 1e-9, "{actual} vs {cost}");
    }

    #[test]
    fn test_improve_removes_crossing() {
        let m = square();
        let result = TwoOptRunner::improve(&m, &[0, 2, 1, 3], &TwoOptConfig::default()).unwrap();
        assert!((result.cost.unwrap() - 40.0).abs() < 1e-9);
        assert!(result.initial_cost.unwrap() > 40.0);
        assert!(result.improvements >= 1);
        assert_eq!(result.tour.as_ref().unwrap()[0], 0);
    }

    #[test]
    fn test_improve_rejects_bad_tours() {
        let m = square();
        let config = TwoOptConfig::default();
        assert!(TwoOptRunner::improve(&m, &[0, 1, 1, 3], &config).is_err());

        let gapped = DistanceMatrix::new(vec![
            vec![0.0, 1.0, INF],
            vec![1.0, 0.0, 1.0],
            vec![INF, 1.0, 0.0],
        ])
        .unwrap();
        assert!(matches!(
            TwoOptRunner::improve(&gapped, &[0, 1, 2], &config),
            Err(TspError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_never_worse_than_start_and_valid() {
        for seed in 0..8 {
            let m = random::euclidean(15, seed).unwrap();
            let result = TwoOptRunner::run(&m, &TwoOptConfig::default().with_seed(seed)).unwrap();
            let tour = result.tour.as_ref().unwrap();
            let cost = result.cost.unwrap();
            assert_eq!(tour[0], 0);
            assert_valid_tour(&m, tour, cost);
            assert!(cost <= result.initial_cost.unwrap() + 1e-9);
        }
    }

    #[test]
    fn test_never_beats_exact() {
        for seed in 0..8 {
            let m = random::euclidean(9, seed).unwrap();
            let exact = HeldKarpRunner::solve(&m).unwrap().unwrap();
            let config = TwoOptConfig::default().with_multi_start(true).with_seed(seed);
            let local = TwoOptRunner::run(&m, &config).unwrap();
            assert_eq!(local.tours_evaluated(), 9);
            let cost = local.cost.unwrap();
            assert!(cost >= exact - 1e-9, "2-opt {cost} < exact {exact}");
            assert_eq!(Some(local.tour.unwrap()[0]), local.start_city);
        }
    }

    #[test]
    fn test_nearest_neighbor_start_is_improved() {
        let m = random::euclidean(20, 4).unwrap();
        let config = TwoOptConfig::default().with_initial_tour(InitialTour::NearestNeighbor);
        let result = TwoOptRunner::run(&m, &config).unwrap();
        let (_, greedy) = greedy_tour(&m, 0).unwrap();
        assert!((result.initial_cost.unwrap() - greedy).abs() < 1e-9);
        assert!(result.cost.unwrap() <= greedy + 1e-9);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let m = random::euclidean(14, 9).unwrap();
        let config = TwoOptConfig::default().with_seed(123);
        let a = TwoOptRunner::run(&m, &config).unwrap();
        let b = TwoOptRunner::run(&m, &config).unwrap();
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.cost, b.cost);
    }

    #[test]
    fn test_never_uses_missing_edges() {
        // Complete graph on 6 cities minus a few edges.
        let base = random::symmetric(6, 20, 5).unwrap();
        let mut rows: Vec<Vec<f64>> = (0..6).map(|i| base.row(i).to_vec()).collect();
        for &(a, b) in &[(0, 2), (1, 4), (3, 5)] {
            rows[a][b] = INF;
            rows[b][a] = INF;
        }
        let m = DistanceMatrix::new(rows).unwrap();
        let config = TwoOptConfig::default()
            .with_initial_tour(InitialTour::NearestNeighbor)
            .with_multi_start(true);
        let result = TwoOptRunner::run(&m, &config).unwrap();
        for (_, cost) in &result.start_costs {
            if let Some(c) = cost {
                assert!(c.is_finite());
            }
        }
        if let (Some(tour), Some(cost)) = (result.tour.as_ref(), result.cost) {
            assert_valid_tour(&m, tour, cost);
        }
    }

    #[test]
    fn test_isolated_city_has_no_tour() {
        let m = DistanceMatrix::new(vec![
            vec![0.0, 1.0, INF, 2.0],
            vec![1.0, 0.0, INF, 3.0],
            vec![INF, INF, 0.0, INF],
            vec![2.0, 3.0, INF, 0.0],
        ])
        .unwrap();
        let config = TwoOptConfig::default().with_multi_start(true).with_seed(1);
        let result = TwoOptRunner::run(&m, &config).unwrap();
        assert_eq!(result.cost, None);
        assert_eq!(result.tour, None);
        assert_eq!(result.tours_evaluated(), 4);
        assert!(result.start_costs.iter().all(|(_, c)| c.is_none()));
    }

    #[test]
    fn test_asymmetric_costs_stay_consistent() {
        let n = 8;
        let mut rng = StdRng::seed_from_u64(17);
        let data = (0..n * n)
            .map(|idx| {
                if idx / n == idx % n {
                    0.0
                } else {
                    f64::from(rng.random_range(1..50u32))
                }
            })
            .collect();
        let m = DistanceMatrix::from_flat(n, data).unwrap();
        assert!(!m.is_symmetric());

        let result = TwoOptRunner::run(&m, &TwoOptConfig::default().with_seed(2)).unwrap();
        let cost = result.cost.unwrap();
        assert_valid_tour(&m, result.tour.as_ref().unwrap(), cost);
        assert!(cost <= result.initial_cost.unwrap());
        assert!(cost >= HeldKarpRunner::solve(&m).unwrap().unwrap());
    }

    #[test]
    fn test_pass_limit() {
        let m = random::euclidean(30, 8).unwrap();
        let config = TwoOptConfig::default().with_seed(8).with_max_passes(1);
        let result = TwoOptRunner::run(&m, &config).unwrap();
        assert_eq!(result.passes, 1);
    }

    #[test]
    fn test_small_instances() {
        let single = DistanceMatrix::new(vec![vec![0.0]]).unwrap();
        let result = TwoOptRunner::run(&single, &TwoOptConfig::default()).unwrap();
        assert_eq!(result.tour, Some(vec![0]));
        assert_eq!(result.cost, Some(0.0));

        let pair = DistanceMatrix::new(vec![vec![0.0, 3.0], vec![4.0, 0.0]]).unwrap();
        let result = TwoOptRunner::run(&pair, &TwoOptConfig::default()).unwrap();
        assert_eq!(result.cost, Some(7.0));
    }

    #[test]
    fn test_start_city_out_of_range() {
        let m = square();
        let err = TwoOptRunner::run(&m, &TwoOptConfig::default().with_start_city(4)).unwrap_err();
        assert!(matches!(err, TspError::InvalidInput(_)));
    }
}
