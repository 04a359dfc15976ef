//! Held-Karp exact TSP solver.
//!
//! Dynamic programming over subsets of cities encoded as bitmasks. For
//! every subset containing the start city 0 and every city `i` in it, the
//! table records the cheapest path from 0 through exactly that subset
//! ending at `i`. Closing the best full-subset path back to 0 gives the
//! optimal Hamiltonian cycle.
//!
//! Time `O(n²·2ⁿ)`, memory `O(n·2ⁿ)`. The city count is capped by
//! [`HeldKarpConfig::max_cities`] so the table size stays under control.
//!
//! Missing edges ([`f64::INFINITY`]) are never traversed; when no cycle
//! exists the result carries no cost rather than an infinite number.
//!
//! # References
//!
//! - Bellman, R. (1962). "Dynamic Programming Treatment of the Travelling
//!   Salesman Problem", *J. ACM* 9(1), 61-63.
//! - Held, M. & Karp, R. M. (1962). "A Dynamic Programming Approach to
//!   Sequencing Problems", *J. SIAM* 10(1), 196-210.

mod config;
mod runner;
mod table;

pub use config::{HeldKarpConfig, Objective, DEFAULT_MAX_CITIES, HARD_MAX_CITIES};
pub use runner::{HeldKarpResult, HeldKarpRunner};
pub use table::HeldKarpTable;
