//! Traveling Salesman solvers over a cost matrix.
//!
//! - **Held-Karp** ([`held_karp`]): exact dynamic programming over subsets
//!   encoded as bitmasks, `O(n²·2ⁿ)` time. Minimizes total cost or, as a
//!   variant, the longest edge (bottleneck TSP). Can reconstruct the
//!   optimal tour.
//! - **Brute force** ([`brute_force`]): evaluates all `(n-1)!` tours and
//!   reports the best and the worst.
//! - **Nearest Neighbor** ([`nearest_neighbor`]): greedy construction,
//!   single- or multi-start.
//! - **2-opt** ([`two_opt`]): local search that reverses tour segments
//!   until no reversal shortens the tour.
//!
//! All solvers consume a validated [`matrix::DistanceMatrix`] in which
//! [`f64::INFINITY`] marks a missing edge. Tours are anchored at city 0
//! unless a solver says otherwise. An instance without any Hamiltonian
//! cycle yields an absent cost, never an infinite number.
//!
//! # Example
//!
//! ```
//! use u_tsp::held_karp::{HeldKarpConfig, HeldKarpRunner};
//! use u_tsp::matrix::DistanceMatrix;
//!
//! let m = DistanceMatrix::new(vec![
//!     vec![0.0, 10.0, 15.0, 20.0],
//!     vec![10.0, 0.0, 35.0, 25.0],
//!     vec![15.0, 35.0, 0.0, 30.0],
//!     vec![20.0, 25.0, 30.0, 0.0],
//! ])?;
//! let result = HeldKarpRunner::run(&m, &HeldKarpConfig::default())?;
//! assert_eq!(result.cost()?, 80.0);
//! assert_eq!(result.tour()?, &[0, 2, 3, 1]);
//! # Ok::<(), u_tsp::TspError>(())
//! ```

pub mod brute_force;
pub mod error;
pub mod held_karp;
pub mod matrix;
pub mod nearest_neighbor;
pub mod two_opt;

pub use error::{Result, TspError};
