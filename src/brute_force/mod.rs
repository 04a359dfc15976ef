//! Exhaustive permutation search.
//!
//! Evaluates every ordering of the non-start cities, `(n-1)!` tours in
//! total, and reports both the cheapest and the most expensive one. Only
//! practical for small instances; mainly used as ground truth for the
//! exact and heuristic solvers.

mod config;
mod runner;

pub use config::{BruteForceConfig, BRUTE_FORCE_HARD_MAX};
pub use runner::{BruteForceResult, BruteForceRunner};
