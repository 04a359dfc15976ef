//! Nearest-Neighbor construction heuristic.
//!
//! Starting from one city, repeatedly travel to the cheapest unvisited
//! city, then return to the start. `O(n²)` per start; the multi-start mode
//! tries every city as the start and keeps the cheapest tour.
//!
//! # References
//!
//! Rosenkrantz, Stearns & Lewis (1977), "An Analysis of Several Heuristics
//! for the Traveling Salesman Problem", *SIAM J. Comput.* 6(3), 563-581.

mod config;
mod runner;

pub use config::NnConfig;
pub use runner::{NnResult, NnRunner};
pub(crate) use runner::greedy_tour;
