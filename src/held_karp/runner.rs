//! Held-Karp execution engine.
//!
//! # Algorithm
//!
//! 1. Allocate `dp[mask][city] = ∞`, set the base `dp[{0}][0] = 0`
//! 2. For every mask in increasing numeric order and every city `i` in it,
//!    relax `dp[mask][i]` from every `dp[mask \ {i}][j]` with a finite edge
//!    `j -> i`
//! 3. Close the cycle: `min over i ≠ 0 of dp[full][i] ⊕ d(i, 0)`
//!
//! Removing a bit always yields a numerically smaller mask, so increasing
//! order visits every dependency first.
//!
//! # Reference
//!
//! Held, M. & Karp, R. M. (1962). "A Dynamic Programming Approach to
//! Sequencing Problems", *J. SIAM* 10(1), 196-210.

use log::debug;
#[cfg(feature = "parallel")]
use log::trace;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::{HeldKarpConfig, Objective};
use super::table::HeldKarpTable;
use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;

/// Result of a Held-Karp run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeldKarpResult {
    /// Optimal cycle value, or `None` when no Hamiltonian cycle through
    /// city 0 exists.
    pub best_cost: Option<f64>,

    /// Optimal tour starting at city 0 (the return to 0 is implied).
    ///
    /// `None` when infeasible or when reconstruction was disabled.
    pub tour: Option<Vec<usize>>,

    /// Objective that was minimized.
    pub objective: Objective,

    /// Number of cities.
    pub cities: usize,

    /// Number of subset masks processed.
    pub subsets: usize,

    /// Number of finite-edge relaxations evaluated.
    pub transitions: u64,
}

impl HeldKarpResult {
    /// Whether a tour exists.
    pub fn is_feasible(&self) -> bool {
        self.best_cost.is_some()
    }

    /// Optimal cost, or [`TspError::NoSolution`].
    pub fn cost(&self) -> Result<f64> {
        self.best_cost.ok_or(TspError::NoSolution)
    }

    /// Optimal tour, or [`TspError::NoSolution`].
    ///
    /// Also fails with `NoSolution` if reconstruction was disabled.
    pub fn tour(&self) -> Result<&[usize]> {
        self.tour.as_deref().ok_or(TspError::NoSolution)
    }
}

/// Held-Karp exact solver.
pub struct HeldKarpRunner;

impl HeldKarpRunner {
    /// Minimum cycle cost through city 0 with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::held_karp::HeldKarpRunner;
    /// use u_tsp::matrix::DistanceMatrix;
    ///
    /// let m = DistanceMatrix::new(vec![
    ///     vec![0.0, 10.0, 15.0, 20.0],
    ///     vec![10.0, 0.0, 35.0, 25.0],
    ///     vec![15.0, 35.0, 0.0, 30.0],
    ///     vec![20.0, 25.0, 30.0, 0.0],
    /// ]).unwrap();
    /// assert_eq!(HeldKarpRunner::solve(&m).unwrap(), Some(80.0));
    /// ```
    pub fn solve(matrix: &DistanceMatrix) -> Result<Option<f64>> {
        let config = HeldKarpConfig::default().with_reconstruct_tour(false);
        Ok(Self::run(matrix, &config)?.best_cost)
    }

    /// Runs the solver and returns the optimum with statistics.
    pub fn run(matrix: &DistanceMatrix, config: &HeldKarpConfig) -> Result<HeldKarpResult> {
        let (table, transitions) = Self::fill(matrix, config)?;
        let n = table.cities();

        let mut best_cost = None;
        let mut tour = None;

        if n == 1 {
            best_cost = Some(0.0);
            if config.reconstruct_tour {
                tour = Some(vec![0]);
            }
        } else {
            let full = table.full_mask();
            let mut best = f64::INFINITY;
            let mut best_last = None;
            for i in 1..n {
                let back = matrix.get(i, 0);
                let path = table.get(full, i);
                if !back.is_finite() || !path.is_finite() {
                    continue;
                }
                let value = config.objective.extend(path, back);
                if value < best {
                    best = value;
                    best_last = Some(i);
                }
            }
            if let Some(last) = best_last {
                best_cost = Some(best);
                if config.reconstruct_tour {
                    tour = table.trace_back(last);
                }
            }
        }

        debug!(
            "held-karp finished: n={n}, cost={best_cost:?}, transitions={transitions}"
        );

        Ok(HeldKarpResult {
            best_cost,
            tour,
            objective: config.objective,
            cities: n,
            subsets: table.subsets(),
            transitions,
        })
    }

    /// Fills and returns the dynamic programming table.
    pub fn build_table(matrix: &DistanceMatrix, config: &HeldKarpConfig) -> Result<HeldKarpTable> {
        Ok(Self::fill(matrix, config)?.0)
    }

    fn fill(matrix: &DistanceMatrix, config: &HeldKarpConfig) -> Result<(HeldKarpTable, u64)> {
        config.validate().map_err(TspError::InvalidInput)?;
        let n = matrix.len();
        if n > config.max_cities {
            return Err(TspError::invalid(format!(
                "{n} cities exceed the configured limit of {}",
                config.max_cities
            )));
        }

        debug!(
            "held-karp start: n={n}, objective={:?}, cells={}",
            config.objective,
            n << n
        );

        let mut table = HeldKarpTable::new(n, config.reconstruct_tour);

        #[cfg(feature = "parallel")]
        let transitions = if config.parallel {
            fill_layers_parallel(matrix, config.objective, &mut table)
        } else {
            fill_sequential(matrix, config.objective, &mut table)
        };

        #[cfg(not(feature = "parallel"))]
        let transitions = {
            if config.parallel {
                debug!("parallel fill requested without the `parallel` feature; filling sequentially");
            }
            fill_sequential(matrix, config.objective, &mut table)
        };

        Ok((table, transitions))
    }
}

/// Best value for cell `(mask, i)` from the already-complete smaller masks.
///
/// Predecessors are scanned in ascending order with a strict comparison,
/// so the lowest-index arg-min wins ties.
fn relax(
    matrix: &DistanceMatrix,
    objective: Objective,
    table: &HeldKarpTable,
    mask: usize,
    i: usize,
) -> (f64, Option<usize>, u64) {
    let prev = mask & !(1 << i);
    let mut best = f64::INFINITY;
    let mut parent = None;
    let mut transitions = 0u64;

    for j in 0..matrix.len() {
        if prev & (1 << j) == 0 {
            continue;
        }
        let edge = matrix.get(j, i);
        if !edge.is_finite() {
            continue;
        }
        let path = table.get(prev, j);
        if !path.is_finite() {
            continue;
        }
        transitions += 1;
        let value = objective.extend(path, edge);
        if value < best {
            best = value;
            parent = Some(j);
        }
    }

    (best, parent, transitions)
}

fn fill_sequential(matrix: &DistanceMatrix, objective: Objective, table: &mut HeldKarpTable) -> u64 {
    let n = matrix.len();
    let mut transitions = 0u64;

    // Masks without city 0 can never be reached from the base cell, and
    // city 0 is never the last city of a mask holding other cities.
    for mask in (3..table.subsets()).step_by(2) {
        for i in 1..n {
            if mask & (1 << i) == 0 {
                continue;
            }
            let (value, parent, evaluated) = relax(matrix, objective, table, mask, i);
            transitions += evaluated;
            if value.is_finite() {
                table.set(mask, i, value, parent);
            }
        }
    }

    transitions
}

/// Fills masks layer by layer (by number of cities), each layer in parallel.
///
/// Every cell of a layer only reads the previous layer, so cells are
/// independent and the outcome matches [`fill_sequential`] exactly.
#[cfg(feature = "parallel")]
fn fill_layers_parallel(
    matrix: &DistanceMatrix,
    objective: Objective,
    table: &mut HeldKarpTable,
) -> u64 {
    let n = matrix.len();
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); n + 1];
    for mask in (3..table.subsets()).step_by(2) {
        layers[mask.count_ones() as usize].push(mask);
    }

    let mut transitions = 0u64;
    for (size, masks) in layers.iter().enumerate().skip(2) {
        let snapshot: &HeldKarpTable = table;
        let updates: Vec<(usize, usize, f64, Option<usize>, u64)> = masks
            .par_iter()
            .flat_map_iter(|&mask| {
                (1..n)
                    .filter(move |&i| mask & (1 << i) != 0)
                    .map(move |i| {
                        let (value, parent, evaluated) =
                            relax(matrix, objective, snapshot, mask, i);
                        (mask, i, value, parent, evaluated)
                    })
            })
            .collect();

        trace!("layer {size}: {} masks, {} cells", masks.len(), updates.len());

        for (mask, i, value, parent, evaluated) in updates {
            transitions += evaluated;
            if value.is_finite() {
                table.set(mask, i, value, parent);
            }
        }
    }

    transitions
}
